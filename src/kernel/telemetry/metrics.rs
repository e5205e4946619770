use std::collections::VecDeque;

use serde::Serialize;

use super::event::{RequestKind, TelemetryEvent};
use crate::kernel::dialog::disambiguator::ClarificationReason;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub request_stats: RequestStats,
    pub dialog_stats: DialogStats,
    pub recommendation_stats: RecommendationStats,
    pub decode_failures: u64,
    pub sessions_ended: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestStats {
    pub launch: u64,
    pub intent: u64,
    pub session_ended: u64,
    pub unknown: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DialogStats {
    pub delegations: u64,
    pub ambiguous_clarifications: u64,
    pub no_match_clarifications: u64,
    pub unvalidated_slots: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationStats {
    pub served: u64,
    pub lookup_misses: u64,
    /// Share of recommendation attempts that found a course.
    pub hit_rate: f64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::RequestReceived { kind } => match kind {
                RequestKind::Launch => snap.request_stats.launch += 1,
                RequestKind::Intent => snap.request_stats.intent += 1,
                RequestKind::SessionEnded => snap.request_stats.session_ended += 1,
                RequestKind::Unknown => snap.request_stats.unknown += 1,
            },
            TelemetryEvent::DialogDelegated { .. } => snap.dialog_stats.delegations += 1,
            TelemetryEvent::ClarificationRequested { reason, .. } => match reason {
                ClarificationReason::MultipleMatches => {
                    snap.dialog_stats.ambiguous_clarifications += 1
                }
                ClarificationReason::NoMatch => snap.dialog_stats.no_match_clarifications += 1,
            },
            TelemetryEvent::SlotUnvalidated { .. } => snap.dialog_stats.unvalidated_slots += 1,
            TelemetryEvent::RecommendationServed { .. } => snap.recommendation_stats.served += 1,
            TelemetryEvent::LookupMiss => snap.recommendation_stats.lookup_misses += 1,
            TelemetryEvent::DecodeFailure => snap.decode_failures += 1,
            TelemetryEvent::SessionEnded => snap.sessions_ended += 1,
        }
    }

    let attempts = snap.recommendation_stats.served + snap.recommendation_stats.lookup_misses;
    if attempts > 0 {
        snap.recommendation_stats.hit_rate =
            snap.recommendation_stats.served as f64 / attempts as f64;
    }

    snap
}
