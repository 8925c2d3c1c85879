//! Create and edit commands: open the form, fill it, submit it.

use anyhow::{Result, bail};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use companion_core::repository::companion::CompanionRepository;
use companion_core::session::{FormSession, open_form};
use companion_core::sink::{Navigator, Notifier};
use companion_core::submission::{SubmissionCoordinator, SubmitOutcome};
use companion_types::companion::{Companion, CompanionId, FieldName};

use super::FieldArgs;
use super::form::{apply_args, print_field_errors, prompt_fields};
use crate::state::AppState;

fn spinner(message: impl Into<std::borrow::Cow<'static, str>>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Ok(spinner)
}

/// Run the companion form end to end.
///
/// `existing` selects edit mode. Fields given as flags are applied first;
/// when a terminal is attached the rest are prompted for, and invalid or
/// failed submissions can be corrected and retried in place.
pub async fn run_form(
    state: &AppState,
    existing: Option<CompanionId>,
    args: &FieldArgs,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let interactive = !args.no_input && !json && console::user_attended();

    let loading = spinner("Loading form...")?;
    let opened = open_form(&state.client, &state.client, existing.as_ref(), state.messages).await;
    loading.finish_and_clear();
    let mut session = opened?;

    let provided = apply_args(&mut session, args)?;

    if interactive {
        let remaining: Vec<FieldName> = FieldName::ALL
            .into_iter()
            .filter(|field| !provided.contains(field))
            .collect();
        prompt_fields(&mut session, &remaining)?;

        println!();
        let confirmed = Confirm::new()
            .with_prompt(format!("{}?", session.submit_label()))
            .default(true)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let coordinator = state.coordinator(json || quiet);
    let saved = submit_until_settled(&coordinator, &mut session, interactive, json).await?;
    if let Some(companion) = saved {
        print_saved(&session, &companion, json, quiet)?;
    }
    Ok(())
}

/// Submit the draft until it is saved or the user gives up.
///
/// Without a terminal a rejected or failed submission ends the command with
/// an error. The failure message names the HTTP status at most; the
/// transport detail stays in the logs.
pub async fn submit_until_settled<R, N, V>(
    coordinator: &SubmissionCoordinator<R, N, V>,
    session: &mut FormSession,
    interactive: bool,
    json: bool,
) -> Result<Option<Companion>>
where
    R: CompanionRepository,
    N: Notifier,
    V: Navigator,
{
    let messages = session.messages();

    loop {
        let saving = spinner(format!("{}...", session.submit_label()))?;
        let outcome = coordinator.submit(&session.draft).await;
        saving.finish_and_clear();
        session.draft.record_outcome(&outcome);

        match outcome {
            SubmitOutcome::Saved(companion) => return Ok(Some(companion)),
            SubmitOutcome::Invalid(errors) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&errors)?);
                    bail!("{errors}");
                }
                print_field_errors(session);
                if !interactive {
                    bail!("{errors}");
                }
                let failing: Vec<FieldName> = errors.fields().collect();
                prompt_fields(session, &failing)?;
            }
            SubmitOutcome::Failed(err) => {
                let failure = match err.status() {
                    Some(status) => format!("{} (HTTP {status})", messages.save_failed),
                    None => messages.save_failed.to_string(),
                };
                if !interactive {
                    bail!(failure);
                }
                let retry = Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    bail!(failure);
                }
            }
            SubmitOutcome::Ignored => {
                tracing::debug!(state = %coordinator.state(), "submit ignored");
                return Ok(None);
            }
        }
    }
}

fn print_saved(session: &FormSession, companion: &Companion, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(companion)?);
        return Ok(());
    }
    if quiet {
        println!("{}", companion.id);
        return Ok(());
    }

    let category = session
        .categories
        .iter()
        .find(|c| c.id.as_str() == companion.fields.category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| companion.fields.category_id.clone());

    println!();
    println!("  {}  {}", style("Name:").bold(), style(&companion.fields.name).cyan());
    println!("  {}    {}", style("Id:").bold(), companion.id);
    println!("  {} {}", style("About:").bold(), companion.fields.description);
    println!("  {}  {}", style("Kind:").bold(), category);
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use companion_core::defaults;
    use companion_core::messages;
    use companion_core::repository::category::CategorySource;
    use companion_types::category::{Category, CategoryId};
    use companion_types::companion::CompanionFields;
    use companion_types::error::TransportError;

    use crate::sink::{ConsoleNavigator, ConsoleNotifier};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(CompanionFields),
        Update(CompanionId),
    }

    /// In-memory store answering every write with `failure`, if set.
    #[derive(Clone, Default)]
    struct ScriptedStore {
        calls: Arc<Mutex<Vec<Call>>>,
        failure: Option<(u16, &'static str)>,
        network_down: bool,
        existing: Option<Companion>,
    }

    impl ScriptedStore {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn answer(&self, id: CompanionId, fields: &CompanionFields) -> Result<Companion, TransportError> {
            if self.network_down {
                return Err(TransportError::Network("connection refused".to_string()));
            }
            if let Some((status, body)) = self.failure {
                return Err(TransportError::from_status(status, body.to_string()));
            }
            Ok(Companion {
                id,
                fields: fields.clone(),
                user_id: None,
                user_name: None,
                created_at: None,
                updated_at: None,
            })
        }
    }

    impl CategorySource for ScriptedStore {
        async fn list_categories(&self) -> Result<Vec<Category>, TransportError> {
            Ok(vec![Category {
                id: CategoryId::new("clx1famous"),
                name: "Famous People".to_string(),
            }])
        }
    }

    impl CompanionRepository for ScriptedStore {
        async fn create_companion(&self, fields: &CompanionFields) -> Result<Companion, TransportError> {
            self.calls.lock().unwrap().push(Call::Create(fields.clone()));
            self.answer(CompanionId::new("clx9new"), fields)
        }

        async fn update_companion(
            &self,
            id: &CompanionId,
            fields: &CompanionFields,
        ) -> Result<Companion, TransportError> {
            self.calls.lock().unwrap().push(Call::Update(id.clone()));
            self.answer(id.clone(), fields)
        }

        async fn get_companion(&self, id: &CompanionId) -> Result<Option<Companion>, TransportError> {
            Ok(self.existing.clone().filter(|c| &c.id == id))
        }
    }

    fn valid_fields() -> CompanionFields {
        CompanionFields {
            src: "https://img.example/elon.png".to_string(),
            name: defaults::EXAMPLE_NAME.to_string(),
            description: defaults::EXAMPLE_DESCRIPTION.to_string(),
            category_id: "clx1famous".to_string(),
            instructions: defaults::EXAMPLE_INSTRUCTIONS.to_string(),
            seed: defaults::EXAMPLE_SEED.to_string(),
        }
    }

    fn coordinator(
        store: &ScriptedStore,
    ) -> SubmissionCoordinator<ScriptedStore, ConsoleNotifier, ConsoleNavigator> {
        SubmissionCoordinator::new(
            store.clone(),
            ConsoleNotifier::new(true),
            ConsoleNavigator::new("http://localhost:3000", true),
        )
    }

    async fn filled_session(store: &ScriptedStore, existing: Option<&CompanionId>) -> FormSession {
        let mut session = open_form(store, store, existing, &messages::EN).await.unwrap();
        session.draft.reset_to(valid_fields());
        session
    }

    #[tokio::test]
    async fn test_valid_draft_is_created_once() {
        let store = ScriptedStore::default();
        let mut session = filled_session(&store, None).await;

        let saved = submit_until_settled(&coordinator(&store), &mut session, false, false)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(saved.id.as_str(), "clx9new");
        assert_eq!(store.calls(), vec![Call::Create(valid_fields())]);
    }

    #[tokio::test]
    async fn test_existing_companion_is_updated() {
        let id = CompanionId::new("clx9elon");
        let store = ScriptedStore {
            existing: Some(Companion {
                id: id.clone(),
                fields: valid_fields(),
                user_id: None,
                user_name: None,
                created_at: None,
                updated_at: None,
            }),
            ..Default::default()
        };
        let mut session = open_form(&store, &store, Some(&id), &messages::EN).await.unwrap();

        let saved = submit_until_settled(&coordinator(&store), &mut session, false, true)
            .await
            .unwrap();

        assert!(saved.is_some());
        assert_eq!(store.calls(), vec![Call::Update(id)]);
    }

    #[tokio::test]
    async fn test_invalid_draft_fails_without_store_call() {
        let store = ScriptedStore::default();
        let mut session = open_form(&store, &store, None, &messages::EN).await.unwrap();
        session.draft.set_field(FieldName::Name, "Elon");

        let err = submit_until_settled(&coordinator(&store), &mut session, false, false)
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("invalid companion definition"));
        assert!(store.calls().is_empty());
        assert_eq!(session.draft.errors().len(), 5);
        assert!(session.draft.field_error(FieldName::Name).is_none());
    }

    #[tokio::test]
    async fn test_server_error_body_is_not_shown() {
        let store = ScriptedStore {
            failure: Some((500, "db password=hunter2")),
            ..Default::default()
        };
        let mut session = filled_session(&store, None).await;

        let err = submit_until_settled(&coordinator(&store), &mut session, false, false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Something went wrong... (HTTP 500)");
        assert!(!format!("{err:#}").contains("hunter2"));
        assert_eq!(session.draft.current_value(), &valid_fields());
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_is_generic() {
        let store = ScriptedStore {
            network_down: true,
            ..Default::default()
        };
        let mut session = filled_session(&store, None).await;

        let err = submit_until_settled(&coordinator(&store), &mut session, false, false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), messages::EN.save_failed);
    }

    #[tokio::test]
    async fn test_settled_coordinator_ignores_further_submits() {
        let store = ScriptedStore::default();
        let coordinator = coordinator(&store);
        let mut session = filled_session(&store, None).await;

        assert!(submit_until_settled(&coordinator, &mut session, false, false)
            .await
            .unwrap()
            .is_some());
        let again = submit_until_settled(&coordinator, &mut session, false, false)
            .await
            .unwrap();

        assert!(again.is_none());
        assert_eq!(store.calls().len(), 1);
    }
}
