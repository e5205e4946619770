pub mod advisor;
pub mod config;
pub mod driver;
pub mod error;
pub mod kernel;
pub mod outputs;
pub mod skill;

pub use error::{ConfigError, SkillError};
pub use skill::handler::SkillHandler;
