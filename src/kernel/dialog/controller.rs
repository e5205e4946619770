use tracing::{debug, info};

use super::disambiguator::{Clarification, Disambiguator};
use crate::skill::event::{DialogState, Intent, Slot, SlotMap};

/// The single outbound dialog signal for a turn that is still collecting.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogDirective {
    /// Let the host prompt for whatever is still missing.
    Delegate { updated_intent: Intent },
    /// Ask about one slot ourselves.
    ElicitSlot {
        clarification: Clarification,
        updated_intent: Intent,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Continue(DialogDirective),
    /// All required slots are filled; the slots are returned as received.
    Completed(SlotMap),
}

pub struct DialogController {
    disambiguator: Disambiguator,
    prefill: Vec<(String, String)>,
}

impl Default for DialogController {
    fn default() -> Self {
        Self::new(Disambiguator::new(), Vec::new())
    }
}

impl DialogController {
    pub fn new(disambiguator: Disambiguator, prefill: Vec<(String, String)>) -> Self {
        Self { disambiguator, prefill }
    }

    /// One step of host-delegated slot collection.
    ///
    /// Anything other than `Completed` (including an absent or unrecognized
    /// state) keeps collecting.
    pub fn delegate_slot_collection(
        &self,
        intent: &Intent,
        dialog_state: Option<DialogState>,
    ) -> DialogOutcome {
        debug!(?dialog_state, "Delegating slot collection");

        let updated_intent = match dialog_state {
            Some(DialogState::Completed) => {
                info!(slots = intent.slots.len(), "Dialog completed");
                return DialogOutcome::Completed(intent.slots.clone());
            }
            Some(DialogState::NotStarted) => self.prefilled(intent),
            Some(DialogState::InProgress) | Some(DialogState::Unrecognized) | None => {
                intent.clone()
            }
        };

        let directive = match self.disambiguator.disambiguate(intent) {
            Some(clarification) => DialogDirective::ElicitSlot {
                clarification,
                updated_intent,
            },
            None => DialogDirective::Delegate { updated_intent },
        };
        DialogOutcome::Continue(directive)
    }

    /// Copy of `intent` with configured defaults written into slots the user left empty.
    fn prefilled(&self, intent: &Intent) -> Intent {
        let mut updated = intent.clone();
        for (name, value) in &self.prefill {
            match updated.slots.get_mut(name) {
                Some(slot) if slot.value.is_none() => {
                    slot.value = Some(value.clone());
                }
                Some(_) => {}
                None => {
                    updated
                        .slots
                        .insert(name.clone(), Slot::new(name).with_value(value));
                }
            }
            debug!(slot = %name, "Prefill applied");
        }
        updated
    }
}
