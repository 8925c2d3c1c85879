//! Shared domain types for Companion Forge.
//!
//! This crate contains the domain types used across the workspace:
//! Companion, its editable field set, Category, client configuration,
//! and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod category;
pub mod companion;
pub mod config;
pub mod error;
