//! Business logic and port definitions for Companion Forge.
//!
//! This crate owns the companion definition schema, the draft state held by
//! the form, and the submission state machine. It defines the "ports"
//! (repository, category source, notification, navigation) that the
//! infrastructure and application layers implement. It depends only on
//! `companion-types` -- never on `companion-infra` or any network crate.

pub mod defaults;
pub mod draft;
pub mod messages;
pub mod repository;
pub mod schema;
pub mod session;
pub mod sink;
pub mod submission;
