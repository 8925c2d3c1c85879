//! Infrastructure layer for Companion Forge.
//!
//! Contains implementations of the ports defined in `companion-core`: the
//! HTTP client for the remote companion store, plus the configuration
//! loader and data directory resolution.

pub mod config;
pub mod http;
