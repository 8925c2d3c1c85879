//! Companion definition schema.
//!
//! A declarative rule per field: every field is required, and the two
//! long-text fields carry a minimum length. Validation is pure (no I/O,
//! no normalization of the values) and reports every failing field at
//! once so the form can annotate all of them.

use serde::Serialize;

use companion_types::companion::{CompanionFields, FieldName};
use companion_types::error::FieldErrors;

use crate::messages::{self, Messages};

/// Minimum length of `instructions`, in characters.
pub const MIN_INSTRUCTIONS_CHARS: usize = 200;

/// Minimum length of `seed`, in characters.
pub const MIN_SEED_CHARS: usize = 200;

/// Rule for a single field: the value must be at least `min_chars` long.
#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: FieldName,
    min_chars: usize,
}

const RULES: [FieldRule; 6] = [
    FieldRule { field: FieldName::Src, min_chars: 1 },
    FieldRule { field: FieldName::Name, min_chars: 1 },
    FieldRule { field: FieldName::Description, min_chars: 1 },
    FieldRule { field: FieldName::CategoryId, min_chars: 1 },
    FieldRule { field: FieldName::Instructions, min_chars: MIN_INSTRUCTIONS_CHARS },
    FieldRule { field: FieldName::Seed, min_chars: MIN_SEED_CHARS },
];

/// A field set that passed the schema.
///
/// Only [`CompanionSchema::validate`] constructs this, so holding one is
/// proof the record is submittable. Values are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedCompanion(CompanionFields);

impl ValidatedCompanion {
    pub fn fields(&self) -> &CompanionFields {
        &self.0
    }

    pub fn into_fields(self) -> CompanionFields {
        self.0
    }
}

/// The rule set, bound to the message catalog used for violations.
#[derive(Debug, Clone, Copy)]
pub struct CompanionSchema {
    messages: &'static Messages,
}

impl CompanionSchema {
    pub fn new(messages: &'static Messages) -> Self {
        Self { messages }
    }

    /// Minimum character count required for `field`.
    pub fn min_chars(field: FieldName) -> usize {
        RULES
            .iter()
            .find(|rule| rule.field == field)
            .map(|rule| rule.min_chars)
            .unwrap_or(1)
    }

    /// Check a single field value, returning the violation message if any.
    ///
    /// Length is counted in `char`s, and values are not trimmed: a lone
    /// space is a non-empty value.
    pub fn check_field(&self, field: FieldName, value: &str) -> Option<&'static str> {
        if value.chars().count() < Self::min_chars(field) {
            Some(self.messages.violation(field))
        } else {
            None
        }
    }

    /// Validate a candidate record against every rule.
    pub fn validate(&self, fields: &CompanionFields) -> Result<ValidatedCompanion, FieldErrors> {
        let mut errors = FieldErrors::new();
        for rule in RULES {
            if let Some(message) = self.check_field(rule.field, fields.get(rule.field)) {
                errors.insert(rule.field, message);
            }
        }

        if errors.is_empty() {
            Ok(ValidatedCompanion(fields.clone()))
        } else {
            Err(errors)
        }
    }
}

impl Default for CompanionSchema {
    fn default() -> Self {
        Self::new(&messages::EN)
    }
}

/// Validate with the default (English) catalog.
pub fn validate(fields: &CompanionFields) -> Result<ValidatedCompanion, FieldErrors> {
    CompanionSchema::default().validate(fields)
}
