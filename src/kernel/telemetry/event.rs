use serde::{Deserialize, Serialize};

use crate::kernel::dialog::disambiguator::ClarificationReason;
use crate::skill::event::{DialogState, Request};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    RequestReceived {
        kind: RequestKind,
    },

    DialogDelegated {
        state: Option<DialogState>,
    },

    ClarificationRequested {
        slot: String,
        reason: ClarificationReason,
    },

    /// A completed slot whose value did not resolve to a known entity.
    SlotUnvalidated {
        slot: String,
    },

    RecommendationServed {
        course_index: usize,
    },

    LookupMiss,

    DecodeFailure,

    SessionEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Launch,
    Intent,
    SessionEnded,
    Unknown,
}

impl From<&Request> for RequestKind {
    fn from(request: &Request) -> Self {
        match request {
            Request::LaunchRequest(_) => RequestKind::Launch,
            Request::IntentRequest(_) => RequestKind::Intent, // Intent name STRIPPED
            Request::SessionEndedRequest(_) => RequestKind::SessionEnded,
            Request::Unknown => RequestKind::Unknown,
        }
    }
}
