use crate::error::ConfigError;
use crate::kernel::dialog::disambiguator::REQUIRED_SLOTS;
use crate::kernel::telemetry::recorder::DEFAULT_CAPACITY;

pub const SKILL_NAME_VAR: &str = "COURSE_ADVISOR_SKILL_NAME";
pub const PREFILL_VAR: &str = "COURSE_ADVISOR_PREFILL";
pub const TELEMETRY_CAPACITY_VAR: &str = "COURSE_ADVISOR_TELEMETRY_CAPACITY";

#[derive(Debug, Clone, PartialEq)]
pub struct SkillConfig {
    /// Name spoken in welcome, help and fallback prompts.
    pub skill_name: String,
    /// Defaults written into empty slots when a dialog starts.
    pub prefill: Vec<(String, String)>,
    pub telemetry_capacity: usize,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            skill_name: "Course Advisor".to_string(),
            prefill: Vec::new(),
            telemetry_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl SkillConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(name) = get(SKILL_NAME_VAR) {
            config.skill_name = name.trim().to_string();
        }
        if let Some(raw) = get(PREFILL_VAR) {
            config.prefill = parse_prefill(&raw)?;
        }
        if let Some(raw) = get(TELEMETRY_CAPACITY_VAR) {
            config.telemetry_capacity =
                raw.trim()
                    .parse()
                    .map_err(|source| ConfigError::InvalidCapacity {
                        value: raw.clone(),
                        source,
                    })?;
        }

        Ok(config)
    }
}

/// "internship=important, interaction=groups" -> pairs.
fn parse_prefill(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (slot, value) = entry
                .split_once('=')
                .map(|(s, v)| (s.trim(), v.trim()))
                .filter(|(s, v)| !s.is_empty() && !v.is_empty())
                .ok_or_else(|| ConfigError::InvalidPrefill(entry.to_string()))?;
            if !REQUIRED_SLOTS.contains(&slot) {
                return Err(ConfigError::UnknownPrefillSlot(slot.to_string()));
            }
            Ok((slot.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SkillConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SkillConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = SkillConfig::from_lookup(lookup_from(&[
            (SKILL_NAME_VAR, "Class Finder"),
            (PREFILL_VAR, "internship=important, interaction = groups"),
            (TELEMETRY_CAPACITY_VAR, "64"),
        ]))
        .unwrap();
        assert_eq!(config.skill_name, "Class Finder");
        assert_eq!(
            config.prefill,
            vec![
                ("internship".to_string(), "important".to_string()),
                ("interaction".to_string(), "groups".to_string()),
            ]
        );
        assert_eq!(config.telemetry_capacity, 64);
    }

    #[test]
    fn rejects_bad_values() {
        let err = SkillConfig::from_lookup(lookup_from(&[(PREFILL_VAR, "internship")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPrefill("internship".to_string()));

        let err = SkillConfig::from_lookup(lookup_from(&[(PREFILL_VAR, "color=blue")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownPrefillSlot("color".to_string()));

        let err =
            SkillConfig::from_lookup(lookup_from(&[(TELEMETRY_CAPACITY_VAR, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCapacity { .. }));
    }
}
