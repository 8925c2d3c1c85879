//! Repository trait definitions (ports).
//!
//! These traits define the remote store interface that the infrastructure
//! layer (companion-infra) implements. The core crate never depends on any
//! specific transport.

pub mod category;
pub mod companion;
