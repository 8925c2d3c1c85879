//! HTTP adapter for the remote companion store.

pub mod client;

pub use client::HttpCompanionClient;
