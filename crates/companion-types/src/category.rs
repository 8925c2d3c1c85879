use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::EmptyIdError;

/// Identifier of a category, assigned by the remote store.
///
/// Opaque: the store decides the format (UUID, cuid, slug, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CategoryId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EmptyIdError);
        }
        Ok(Self::new(s))
    }
}

/// A read-only classification tag a companion belongs to.
///
/// Categories are listed by the remote store in display order and are never
/// created or changed by the companion form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
