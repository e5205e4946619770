use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("decode request envelope: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("completed dialog is missing answer for slot {0}")]
    MissingAnswer(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid prefill entry {0:?}, expected slot=value")]
    InvalidPrefill(String),
    #[error("unknown prefill slot {0:?}")]
    UnknownPrefillSlot(String),
    #[error("invalid telemetry capacity {value:?}: {source}")]
    InvalidCapacity {
        value: String,
        source: std::num::ParseIntError,
    },
}
