//! # theoria-observability
//!
//! Structured tracing setup with span names and log events, plus the
//! instrumentation sinks retrieval spans are delivered to.

pub mod sinks;
pub mod tracing_setup;

pub use sinks::{RecordingSink, TracingSink};
