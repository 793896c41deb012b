//! One prediction screen: a form, its surfaced field errors, and the client.
//!
//! Control flows one way, form to client to sink. The only thing that comes
//! back is the submit control becoming available again. Field values are
//! never cleared by a submission, successful or not.
//!
//! [`PredictionScreen::submit`] returns a future that does not borrow the
//! screen, so the screen can be closed while its submission runs. Closing it
//! cancels that submission and its result is discarded. Submissions started
//! elsewhere on a shared client are left alone.

use crate::client::{PredictionClient, SubmitStatus};
use crate::form::{Field, FormState, Validation};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct PredictionScreen {
    form: FormState,
    field_errors: Validation,
    client: Arc<PredictionClient>,
    closed: CancellationToken,
}

impl PredictionScreen {
    pub fn new(client: Arc<PredictionClient>) -> Self {
        Self {
            form: FormState::new(),
            field_errors: Validation::default(),
            client,
            closed: CancellationToken::new(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn client(&self) -> &Arc<PredictionClient> {
        &self.client
    }

    /// Replace the form with the result of `f`.
    pub fn update(&mut self, f: impl FnOnce(FormState) -> FormState) {
        let form = std::mem::take(&mut self.form);
        self.form = f(form);
    }

    pub fn set_text(&mut self, field: Field, value: &str) {
        self.update(|form| form.with_text(field, value));
    }

    /// Message shown next to `field` after the last validation, if any.
    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.error_for(field)
    }

    pub fn field_errors(&self) -> &Validation {
        &self.field_errors
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.client.is_submitting()
    }

    /// Validate every field and surface the messages. True iff all pass.
    pub fn validate(&mut self) -> bool {
        self.field_errors = self.form.validate();
        self.field_errors.is_valid()
    }

    /// Validate, then hand a fresh request to the client.
    ///
    /// Validation runs now and its messages are surfaced immediately. The
    /// returned future resolves to `Cancelled` if the screen is dropped first.
    pub fn submit(&mut self) -> impl Future<Output = SubmitStatus> + Send + 'static {
        let prepared = if !self.can_submit() {
            Err(SubmitStatus::Busy)
        } else {
            match self.form.to_request() {
                Ok(request) => {
                    self.field_errors = Validation::default();
                    Ok(request)
                }
                Err(validation) => {
                    debug!(failing = validation.len(), "form invalid; not submitting");
                    self.field_errors = validation.clone();
                    Err(SubmitStatus::Invalid(validation))
                }
            }
        };
        let client = Arc::clone(&self.client);
        let closed = self.closed.clone();

        async move {
            let request = match prepared {
                Ok(request) => request,
                Err(status) => return status,
            };
            tokio::select! {
                biased;
                _ = closed.cancelled() => {
                    debug!("screen closed with a submission in flight; cancelled");
                    SubmitStatus::Cancelled
                }
                status = client.submit(request) => status,
            }
        }
    }
}

impl Drop for PredictionScreen {
    fn drop(&mut self) {
        self.closed.cancel();
    }
}
