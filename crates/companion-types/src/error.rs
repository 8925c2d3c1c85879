use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::companion::FieldName;

/// Field-level validation failures, keyed by field name.
///
/// Every failing field carries one human-readable message. Iteration follows
/// form order so callers can annotate fields top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldName, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the violation recorded for `field`, if any.
    pub fn remove(&mut self, field: FieldName) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Failing fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "invalid companion definition ({})", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// An id string was empty. Any other value is accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("id must not be empty")]
pub struct EmptyIdError;

/// Failures talking to the remote companion store.
///
/// None of these details are shown to the user; the submission workflow
/// reports a generic message and logs the variant.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("store responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("store rejected the request (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed store response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Classify a non-success HTTP status: 4xx is a rejection of this
    /// request, anything else is a server-side failure.
    pub fn from_status(status: u16, body: String) -> Self {
        if (400..500).contains(&status) {
            TransportError::Rejected { status, body }
        } else {
            TransportError::Status { status, body }
        }
    }

    /// HTTP status of the failed exchange, if the store answered at all.
    ///
    /// This is the only part of the error fit to show a user; bodies may
    /// carry arbitrary server output.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } | TransportError::Rejected { status, .. } => {
                Some(*status)
            }
            TransportError::Network(_) | TransportError::MalformedResponse(_) => None,
        }
    }
}
