pub mod catalog;

use crate::error::SkillError;
use crate::kernel::dialog::slots::SlotValues;

pub use catalog::{lookup, CompositeKey, Course, CourseEntry};

/// The four resolved answers the recommendation is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub topic_importance: String,
    pub time: String,
    pub interaction: String,
    pub internship: String,
}

impl Answers {
    pub fn from_slot_values(values: &SlotValues) -> Result<Self, SkillError> {
        let take = |name: &str| {
            values
                .resolved(name)
                .map(str::to_string)
                .ok_or_else(|| SkillError::MissingAnswer(name.to_string()))
        };
        Ok(Self {
            topic_importance: take("topicImportance")?,
            time: take("time")?,
            interaction: take("interaction")?,
            internship: take("internship")?,
        })
    }

    pub fn key(&self) -> CompositeKey {
        CompositeKey::new(&self.topic_importance, &self.time, &self.interaction, &self.internship)
    }

    pub fn recommend(&self) -> Option<CourseEntry> {
        lookup(&self.key())
    }
}
