//! Observability setup for Companion Forge: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
