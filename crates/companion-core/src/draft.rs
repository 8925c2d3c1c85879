//! Draft state held by the companion form.
//!
//! A `CompanionDraft` is created when the form mounts (from an existing
//! companion in edit mode, empty in create mode) and mutated one field at
//! a time. It never validates on write; callers ask for validation when
//! they need it. The draft also carries the form's inline error channel,
//! filled from rejected submissions.

use companion_types::companion::{Companion, CompanionFields, CompanionId, FieldName};
use companion_types::error::FieldErrors;

use crate::schema::{CompanionSchema, ValidatedCompanion};
use crate::submission::SubmitOutcome;

/// Whether the draft creates a new companion or edits a stored one.
///
/// Decided once when the draft is created; the id of an existing companion
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    New,
    Existing(CompanionId),
}

impl DraftMode {
    pub fn is_existing(&self) -> bool {
        matches!(self, DraftMode::Existing(_))
    }

    pub fn id(&self) -> Option<&CompanionId> {
        match self {
            DraftMode::New => None,
            DraftMode::Existing(id) => Some(id),
        }
    }
}

/// In-memory state of the companion form.
#[derive(Debug, Clone)]
pub struct CompanionDraft {
    mode: DraftMode,
    initial: CompanionFields,
    values: CompanionFields,
    errors: FieldErrors,
    schema: CompanionSchema,
}

impl CompanionDraft {
    /// Empty draft in create mode.
    pub fn new() -> Self {
        Self {
            mode: DraftMode::New,
            initial: CompanionFields::default(),
            values: CompanionFields::default(),
            errors: FieldErrors::new(),
            schema: CompanionSchema::default(),
        }
    }

    /// Draft in edit mode, every field seeded from `companion`.
    pub fn from_companion(companion: &Companion) -> Self {
        Self {
            mode: DraftMode::Existing(companion.id.clone()),
            initial: companion.fields.clone(),
            values: companion.fields.clone(),
            errors: FieldErrors::new(),
            schema: CompanionSchema::default(),
        }
    }

    /// Edit mode when initial data is supplied, create mode otherwise.
    pub fn from_initial(initial: Option<&Companion>) -> Self {
        match initial {
            Some(companion) => Self::from_companion(companion),
            None => Self::new(),
        }
    }

    /// Use `schema` (and its message catalog) for validation.
    pub fn with_schema(mut self, schema: CompanionSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn mode(&self) -> &DraftMode {
        &self.mode
    }

    pub fn current_value(&self) -> &CompanionFields {
        &self.values
    }

    pub fn field(&self, field: FieldName) -> &str {
        self.values.get(field)
    }

    /// Overwrite one field. Last write wins; the value is not validated.
    ///
    /// Editing a field clears its inline error.
    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.errors.remove(field);
    }

    /// Restore the values the draft was created with.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
    }

    /// Replace every value at once.
    pub fn reset_to(&mut self, values: CompanionFields) {
        self.values = values;
        self.errors.clear();
    }

    /// Whether the values differ from those the draft was created with.
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    pub fn schema(&self) -> &CompanionSchema {
        &self.schema
    }

    /// Run the schema against the current values.
    pub fn validation(&self) -> Result<ValidatedCompanion, FieldErrors> {
        self.schema.validate(&self.values)
    }

    pub fn is_submittable(&self) -> bool {
        self.validation().is_ok()
    }

    /// Inline errors from the last rejected submission.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(field)
    }

    /// Update the inline error channel from a submission outcome.
    ///
    /// A rejected submission replaces the errors; any other outcome except
    /// an ignored one clears them.
    pub fn record_outcome(&mut self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Invalid(errors) => self.errors = errors.clone(),
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Saved(_) | SubmitOutcome::Failed(_) => self.errors.clear(),
        }
    }
}

impl Default for CompanionDraft {
    fn default() -> Self {
        Self::new()
    }
}
