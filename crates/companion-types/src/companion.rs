use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::EmptyIdError;

/// Unique identifier for a companion, assigned by the remote store.
///
/// Opaque: the client never mints ids and never assumes a format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanionId(String);

impl CompanionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CompanionId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EmptyIdError);
        }
        Ok(Self::new(s))
    }
}

/// The six user-editable fields of a companion definition.
///
/// Ordered the way the form presents them: avatar first, then identity,
/// category, and the two long-text configuration areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Src,
    Name,
    Description,
    CategoryId,
    Instructions,
    Seed,
}

impl FieldName {
    /// Every field, in form order.
    pub const ALL: [FieldName; 6] = [
        FieldName::Src,
        FieldName::Name,
        FieldName::Description,
        FieldName::CategoryId,
        FieldName::Instructions,
        FieldName::Seed,
    ];

    /// Wire name of the field (the JSON key sent to the store).
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Src => "src",
            FieldName::Name => "name",
            FieldName::Description => "description",
            FieldName::CategoryId => "categoryId",
            FieldName::Instructions => "instructions",
            FieldName::Seed => "seed",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "src" | "image" => Ok(FieldName::Src),
            "name" => Ok(FieldName::Name),
            "description" => Ok(FieldName::Description),
            "categoryId" | "category_id" | "category" => Ok(FieldName::CategoryId),
            "instructions" => Ok(FieldName::Instructions),
            "seed" => Ok(FieldName::Seed),
            other => Err(format!("unknown companion field: '{other}'")),
        }
    }
}

/// Editable field set of a companion, exactly as sent to the store.
///
/// Values are raw user input; nothing here guarantees validity. See
/// `companion_core::schema` for the rules a submittable record satisfies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionFields {
    /// Reference to the uploaded avatar image (opaque id or URL).
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub name: String,
    /// Short description shown in listings.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: String,
    /// Behavioral instructions (system-prompt-like backstory).
    #[serde(default)]
    pub instructions: String,
    /// Example dialogue transcript.
    #[serde(default)]
    pub seed: String,
}

impl CompanionFields {
    /// Read a single field by name.
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Src => &self.src,
            FieldName::Name => &self.name,
            FieldName::Description => &self.description,
            FieldName::CategoryId => &self.category_id,
            FieldName::Instructions => &self.instructions,
            FieldName::Seed => &self.seed,
        }
    }

    /// Overwrite a single field by name.
    pub fn set(&mut self, field: FieldName, value: String) {
        let slot = match field {
            FieldName::Src => &mut self.src,
            FieldName::Name => &mut self.name,
            FieldName::Description => &mut self.description,
            FieldName::CategoryId => &mut self.category_id,
            FieldName::Instructions => &mut self.instructions,
            FieldName::Seed => &mut self.seed,
        };
        *slot = value;
    }
}

/// A companion as persisted by the remote store.
///
/// The store assigns `id` and owns the ownership/timestamp metadata; the
/// client tolerates any of those being absent from a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Companion {
    pub id: CompanionId,
    #[serde(flatten)]
    pub fields: CompanionFields,
    /// Owning user, as recorded by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Display name of the owning user at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
