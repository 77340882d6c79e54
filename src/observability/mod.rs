//! Observability
//!
//! Logging goes through `tracing`; see [`telemetry`] for subscriber setup.

pub mod telemetry;
