//! 预测客户端：单次提交的完整生命周期。
//!
//! Prediction client: owns the lifecycle of one submission at a time.

use crate::client::classify;
use crate::client::state::{StateMachine, SubmissionState};
use crate::client::types::{CancelHandle, SubmitStatus};
use crate::config::ClientConfig;
use crate::presentation::{dispatch, OutcomeSink};
use crate::transport::HttpTransport;
use crate::types::{ModelInfo, PredictionOutcome, PredictionRequest};
use crate::{Error, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Client for the yield prediction service.
///
/// One instance runs at most one submission at a time; a second `submit`
/// while one is in flight returns [`SubmitStatus::Busy`] without touching the
/// network. No retries are made.
pub struct PredictionClient {
    pub(crate) config: ClientConfig,
    pub(crate) transport: HttpTransport,
    pub(crate) sink: Arc<dyn OutcomeSink>,
    pub(crate) machine: StateMachine,
}

impl PredictionClient {
    pub fn builder() -> crate::client::PredictionClientBuilder {
        crate::client::PredictionClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> SubmissionState {
        self.machine.state()
    }

    /// Bind the submit control and loading indicator to this.
    pub fn is_submitting(&self) -> bool {
        self.machine.is_submitting()
    }

    /// Observe changes of [`is_submitting`](Self::is_submitting).
    pub fn subscribe_submitting(&self) -> watch::Receiver<bool> {
        self.machine.subscribe()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            machine: self.machine.clone(),
        }
    }

    /// Run one submission to its terminal outcome.
    ///
    /// The outcome is delivered to the configured sink after the submitting
    /// flag has been cleared, and also returned.
    pub async fn submit(&self, request: PredictionRequest) -> SubmitStatus {
        let guard = match self.machine.try_begin() {
            Some(guard) => guard,
            None => {
                debug!("submission already in flight; ignoring submit");
                return SubmitStatus::Busy;
            }
        };

        let submission_id = Uuid::new_v4().to_string();
        info!(
            submission_id = %submission_id,
            region = %request.region(),
            crop = %request.crop(),
            "submitting yield prediction"
        );

        let outcome = tokio::select! {
            biased;
            _ = guard.token().cancelled() => {
                info!(submission_id = %submission_id, "submission cancelled; discarding result");
                return SubmitStatus::Cancelled;
            }
            outcome = self.execute_once(&request, &submission_id) => outcome,
        };

        match &outcome {
            PredictionOutcome::Success(estimate) => info!(
                submission_id = %submission_id,
                yield_text = %estimate.display_text(),
                "prediction succeeded"
            ),
            PredictionOutcome::ApiError {
                status_code,
                message,
                ..
            } => warn!(
                submission_id = %submission_id,
                status = status_code,
                message = %message,
                "prediction rejected by service"
            ),
            PredictionOutcome::TransportError { message } => warn!(
                submission_id = %submission_id,
                message = %message,
                "prediction request failed"
            ),
        }

        guard.finish(&outcome);
        dispatch(&outcome, self.sink.as_ref());
        SubmitStatus::Completed(outcome)
    }

    /// Single attempt: serialize, POST, classify.
    async fn execute_once(&self, request: &PredictionRequest, submission_id: &str) -> PredictionOutcome {
        let payload = match request.to_payload() {
            Ok(p) => p,
            Err(e) => return PredictionOutcome::transport_error(e.to_string()),
        };
        debug!(submission_id = %submission_id, payload = %payload, "prediction payload");

        let url = self.config.predict_url();
        match self
            .transport
            .post_json(&url, &payload, Some(submission_id))
            .await
        {
            Ok(raw) => {
                debug!(submission_id = %submission_id, status = raw.status, "prediction response");
                classify::interpret(&raw)
            }
            Err(e) => PredictionOutcome::transport_error(e.to_string()),
        }
    }

    /// Fetch model metadata. Independent of the submission state machine.
    pub async fn model_info(&self) -> Result<ModelInfo> {
        let url = self.config.model_info_url();
        debug!(url = %url, "fetching model info");
        let raw = self.transport.get(&url).await?;
        if raw.status != 200 {
            return Err(Error::Remote {
                status: raw.status,
                message: classify::error_message_from_body(&raw.body),
            });
        }
        Ok(serde_json::from_str(&raw.body)?)
    }
}
