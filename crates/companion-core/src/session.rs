//! Form session bootstrap.
//!
//! Opening the companion form reads the category list once and, when an
//! existing companion is being edited, loads it so the draft can be seeded.
//! The edit/create decision is made here and never revisited.

use tracing::debug;

use companion_types::category::Category;
use companion_types::companion::CompanionId;
use companion_types::error::TransportError;

use crate::draft::{CompanionDraft, DraftMode};
use crate::messages::Messages;
use crate::repository::category::CategorySource;
use crate::repository::companion::CompanionRepository;
use crate::schema::CompanionSchema;

/// Errors opening the form.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("companion {0} not found")]
    NotFound(CompanionId),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Everything the form needs once it is mounted.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub draft: CompanionDraft,
    /// Category options, in the order the store listed them.
    pub categories: Vec<Category>,
    messages: &'static Messages,
}

impl FormSession {
    /// Label of the submit control, which depends on the draft's mode.
    pub fn submit_label(&self) -> &'static str {
        match self.draft.mode() {
            DraftMode::New => self.messages.create_label,
            DraftMode::Existing(_) => self.messages.edit_label,
        }
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    /// Name of the category currently selected in the draft, if it is one
    /// of the listed options.
    pub fn selected_category(&self) -> Option<&Category> {
        let selected = self.draft.current_value().category_id.as_str();
        self.categories
            .iter()
            .find(|category| category.id.as_str() == selected)
    }
}

/// Open the form for a new companion (`existing` = `None`) or for editing
/// the companion with the given id.
pub async fn open_form<C, R>(
    categories: &C,
    companions: &R,
    existing: Option<&CompanionId>,
    messages: &'static Messages,
) -> Result<FormSession, SessionError>
where
    C: CategorySource,
    R: CompanionRepository,
{
    let categories = categories.list_categories().await?;

    let initial = match existing {
        Some(id) => Some(
            companions
                .get_companion(id)
                .await?
                .ok_or_else(|| SessionError::NotFound(id.clone()))?,
        ),
        None => None,
    };

    let draft = CompanionDraft::from_initial(initial.as_ref())
        .with_schema(CompanionSchema::new(messages));
    debug!(
        mode = if draft.mode().is_existing() { "edit" } else { "create" },
        categories = categories.len(),
        "companion form opened"
    );

    Ok(FormSession {
        draft,
        categories,
        messages,
    })
}
