use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::skill::event::{Intent, StatusCode};

/// Slots the recommendation cannot be made without.
pub const REQUIRED_SLOTS: [&str; 4] = ["internship", "interaction", "time", "topicImportance"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClarificationReason {
    /// A synonym mapped to more than one canonical value.
    MultipleMatches,
    /// A required slot's value is not a known entity.
    NoMatch,
}

/// A single clarifying question for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clarification {
    pub slot: String,
    pub prompt: String,
    pub reprompt: String,
    pub reason: ClarificationReason,
}

pub struct Disambiguator {
    required_slots: Vec<String>,
}

impl Default for Disambiguator {
    fn default() -> Self {
        Self::new()
    }
}

impl Disambiguator {
    pub fn new() -> Self {
        Self::with_required_slots(&REQUIRED_SLOTS)
    }

    pub fn with_required_slots(required: &[&str]) -> Self {
        Self {
            required_slots: required.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_required(&self, slot_name: &str) -> bool {
        self.required_slots.iter().any(|s| s == slot_name)
    }

    /// Walks the slots in declaration order and returns a question for the first
    /// one that needs clarifying. Later slots wait for a later turn.
    pub fn disambiguate(&self, intent: &Intent) -> Option<Clarification> {
        for slot in intent.slots.values() {
            if slot.is_confirmed() {
                continue;
            }
            let Some(resolution) = slot.first_resolution() else {
                continue;
            };

            match resolution.code() {
                StatusCode::Match if resolution.values.len() > 1 => {
                    let candidates: Vec<&str> = resolution.candidate_names().collect();
                    let prompt = which_would_you_like(&candidates);
                    info!(slot = %slot.name, candidates = candidates.len(), "Ambiguous slot, eliciting");
                    return Some(Clarification {
                        slot: slot.name.clone(),
                        reprompt: prompt.clone(),
                        prompt,
                        reason: ClarificationReason::MultipleMatches,
                    });
                }
                StatusCode::NoMatch => {
                    // Unknown synonyms are worth capturing to extend the slot type.
                    debug!(slot = %slot.name, value = ?slot.value, "No entity match");
                    if self.is_required(&slot.name) {
                        let prompt = format!("What {} are you looking for", slot.name);
                        info!(slot = %slot.name, "Required slot unmatched, eliciting");
                        return Some(Clarification {
                            slot: slot.name.clone(),
                            reprompt: prompt.clone(),
                            prompt,
                            reason: ClarificationReason::NoMatch,
                        });
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// "Which would you like  a  b  or  c?"
fn which_would_you_like(candidates: &[&str]) -> String {
    let mut prompt = String::from("Which would you like");
    let last = candidates.len().saturating_sub(1);
    for (index, name) in candidates.iter().enumerate() {
        if index == last && index > 0 {
            prompt.push_str("  or");
        }
        prompt.push_str("  ");
        prompt.push_str(name);
    }
    prompt.push('?');
    prompt
}
