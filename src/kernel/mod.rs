pub mod dialog;
pub mod telemetry;
