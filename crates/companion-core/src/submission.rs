//! Submission coordinator: validate, dispatch, report, navigate.
//!
//! The coordinator owns the only piece of shared mutable state in the
//! workflow: its [`SubmissionState`]. A submit call is admitted only from
//! `Idle` or `Failed`; admission, validation, and the move to `Dispatching`
//! all happen synchronously inside [`SubmissionCoordinator::submit`] before
//! the returned future is ever polled, so a second submit issued while the
//! first is outstanding is a no-op.
//!
//! ```text
//!   Idle/Failed --submit--> Validating --invalid--> Idle
//!                                |
//!                                +--valid--> Dispatching --ok----> Succeeded
//!                                                 |  \----err---> Failed
//!                                                 \--dropped---> Idle
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use companion_types::companion::Companion;
use companion_types::error::{FieldErrors, TransportError};

use crate::draft::{CompanionDraft, DraftMode};
use crate::messages::{self, Messages};
use crate::repository::companion::CompanionRepository;
use crate::schema::ValidatedCompanion;
use crate::sink::{Navigator, Notifier, Severity};

/// Lifecycle of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Dispatching,
    /// Terminal: the draft was saved and the user was sent away.
    Succeeded,
    /// The last dispatch failed; the draft may be corrected and resubmitted.
    Failed,
}

impl SubmissionState {
    /// Whether a submission is outstanding (the submit control is disabled).
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::Dispatching)
    }

    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle | Failed, Validating)
                | (Validating, Idle | Dispatching)
                | (Dispatching, Succeeded | Failed | Idle)
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::Validating => write!(f, "validating"),
            SubmissionState::Dispatching => write!(f, "dispatching"),
            SubmissionState::Succeeded => write!(f, "succeeded"),
            SubmissionState::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one submit call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Another submission was outstanding (or the draft was already saved);
    /// nothing happened.
    Ignored,
    /// The draft failed the schema. No request was made; the errors belong
    /// in the form's inline error channel.
    Invalid(FieldErrors),
    /// The store accepted the draft.
    Saved(Companion),
    /// The store call failed. The user saw a generic error notification;
    /// the detail here is for logs only.
    Failed(TransportError),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

/// What an admitted submit will send.
struct Dispatch {
    mode: DraftMode,
    fields: ValidatedCompanion,
}

/// Marks a dispatch in progress. If dropped before it is settled, the
/// coordinator goes back to `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a Mutex<SubmissionState>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, next: SubmissionState) {
        let mut state = self.state.lock().expect("submission state lock poisoned");
        debug_assert!(state.can_transition_to(next), "{} -> {next}", *state);
        *state = next;
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            if *state == SubmissionState::Dispatching {
                *state = SubmissionState::Idle;
                debug!("in-flight submission abandoned");
            }
        }
    }
}

/// Drives a draft from submit to saved-and-redirected or failed-and-retryable.
///
/// One coordinator serves one form. It is generic over the repository and
/// both sinks so the workflow can run against the HTTP store, a console,
/// or test doubles.
pub struct SubmissionCoordinator<R: CompanionRepository, N: Notifier, V: Navigator> {
    repository: R,
    notifier: N,
    navigator: V,
    messages: &'static Messages,
    landing_route: String,
    state: Mutex<SubmissionState>,
}

impl<R: CompanionRepository, N: Notifier, V: Navigator> SubmissionCoordinator<R, N, V> {
    /// Create an idle coordinator with English notifications and `/` as
    /// the landing route.
    pub fn new(repository: R, notifier: N, navigator: V) -> Self {
        Self {
            repository,
            notifier,
            navigator,
            messages: &messages::EN,
            landing_route: "/".to_string(),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    /// Use `messages` for the success and failure notifications.
    pub fn with_messages(mut self, messages: &'static Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Redirect here after a successful save.
    pub fn with_landing_route(mut self, route: impl Into<String>) -> Self {
        self.landing_route = route.into();
        self
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().expect("submission state lock poisoned")
    }

    pub fn is_submitting(&self) -> bool {
        self.state().is_submitting()
    }

    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    /// Submit `draft`.
    ///
    /// The guard check, validation, and snapshot of the field values happen
    /// now; the returned future performs the store call and reporting. The
    /// future does not borrow the draft, so the form stays editable while it
    /// is pending; those edits apply to the next submission, not this one.
    pub fn submit<'a>(
        &'a self,
        draft: &CompanionDraft,
    ) -> impl Future<Output = SubmitOutcome> + use<'a, R, N, V> {
        let admitted = self
            .admit(draft)
            .map(|dispatch| (dispatch, InFlight::new(&self.state)));

        async move {
            let (dispatch, in_flight) = match admitted {
                Ok(admitted) => admitted,
                Err(outcome) => return outcome,
            };
            self.dispatch(dispatch, in_flight).await
        }
    }

    /// Move Idle/Failed -> Validating -> Dispatching, or refuse.
    fn admit(&self, draft: &CompanionDraft) -> Result<Dispatch, SubmitOutcome> {
        let mut state = self.state.lock().expect("submission state lock poisoned");

        if !state.can_transition_to(SubmissionState::Validating) {
            debug!(state = %*state, "submit ignored");
            return Err(SubmitOutcome::Ignored);
        }
        *state = SubmissionState::Validating;

        match draft.validation() {
            Ok(fields) => {
                *state = SubmissionState::Dispatching;
                Ok(Dispatch {
                    mode: draft.mode().clone(),
                    fields,
                })
            }
            Err(errors) => {
                *state = SubmissionState::Idle;
                debug!(
                    failing = errors.len(),
                    fields = %errors.fields().map(|f| f.as_str()).collect::<Vec<_>>().join(","),
                    "submit rejected by schema"
                );
                Err(SubmitOutcome::Invalid(errors))
            }
        }
    }

    async fn dispatch(&self, dispatch: Dispatch, in_flight: InFlight<'_>) -> SubmitOutcome {
        let fields = dispatch.fields.fields();
        let result = match &dispatch.mode {
            DraftMode::New => {
                debug!("creating companion");
                self.repository.create_companion(fields).await
            }
            DraftMode::Existing(id) => {
                debug!(companion_id = %id, "updating companion");
                self.repository.update_companion(id, fields).await
            }
        };

        match result {
            Ok(companion) => {
                info!(
                    companion_id = %companion.id,
                    mode = if dispatch.mode.is_existing() { "update" } else { "create" },
                    "companion saved"
                );
                self.notifier.notify(self.messages.saved, Severity::Normal);
                self.navigator.refresh_current_view();
                self.navigator.navigate(&self.landing_route);
                in_flight.settle(SubmissionState::Succeeded);
                SubmitOutcome::Saved(companion)
            }
            Err(err) => {
                warn!(error = %err, "companion save failed");
                self.notifier.notify(self.messages.save_failed, Severity::Error);
                in_flight.settle(SubmissionState::Failed);
                SubmitOutcome::Failed(err)
            }
        }
    }
}
