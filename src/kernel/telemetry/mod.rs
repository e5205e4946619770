//! Turn telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer. The dialog and lookup logic never
//! reads it back; it exists for observability only.
//!
//! # PRIVACY INVARIANT
//! Events must **NEVER** contain what the user said. Slot names, request kinds,
//! course indices and counts are allowed; slot values and speech text are not.

pub mod event;
pub mod metrics;
pub mod recorder;
