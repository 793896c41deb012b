//! Presentation boundary.
//!
//! The client never drives dialogs or navigation itself. It hands each
//! terminal outcome to an [`OutcomeSink`], and the UI decides how to render it.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`OutcomeSink`] | Three callbacks, one per outcome kind |
//! | [`NoopOutcomeSink`] | Default sink; ignores everything |
//! | [`InMemoryOutcomeSink`] | Records calls, for tests and headless callers |

use crate::types::PredictionOutcome;
use std::sync::{Arc, Mutex};

/// Receiver for terminal submission outcomes.
///
/// Exactly one method is called per completed submission. Cancelled and
/// rejected submissions call none.
pub trait OutcomeSink: Send + Sync {
    /// `yield_text` is already formatted, e.g. `"4.57 tons/ha"` or `"N/A"`.
    fn on_success(&self, yield_text: &str);
    fn on_api_error(&self, status_code: u16, message: &str);
    fn on_transport_error(&self, message: &str);
}

/// Route an outcome to the matching callback.
pub fn dispatch(outcome: &PredictionOutcome, sink: &dyn OutcomeSink) {
    match outcome {
        PredictionOutcome::Success(estimate) => sink.on_success(&estimate.display_text()),
        PredictionOutcome::ApiError {
            status_code,
            message,
            ..
        } => sink.on_api_error(*status_code, message),
        PredictionOutcome::TransportError { message } => sink.on_transport_error(message),
    }
}

pub struct NoopOutcomeSink;

impl OutcomeSink for NoopOutcomeSink {
    fn on_success(&self, _yield_text: &str) {}
    fn on_api_error(&self, _status_code: u16, _message: &str) {}
    fn on_transport_error(&self, _message: &str) {}
}

pub fn noop_sink() -> Arc<dyn OutcomeSink> {
    Arc::new(NoopOutcomeSink)
}

/// One recorded callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success { yield_text: String },
    ApiError { status_code: u16, message: String },
    TransportError { message: String },
}

#[derive(Default)]
pub struct InMemoryOutcomeSink {
    events: Mutex<Vec<Notification>>,
}

impl InMemoryOutcomeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, event: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl OutcomeSink for InMemoryOutcomeSink {
    fn on_success(&self, yield_text: &str) {
        self.push(Notification::Success {
            yield_text: yield_text.to_string(),
        });
    }

    fn on_api_error(&self, status_code: u16, message: &str) {
        self.push(Notification::ApiError {
            status_code,
            message: message.to_string(),
        });
    }

    fn on_transport_error(&self, message: &str) {
        self.push(Notification::TransportError {
            message: message.to_string(),
        });
    }
}
