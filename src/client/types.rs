use crate::client::state::StateMachine;
use crate::form::Validation;
use crate::types::PredictionOutcome;

/// What became of a call to `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    /// The exchange ran to a terminal outcome, which was also dispatched to the sink.
    Completed(PredictionOutcome),
    /// Another submission was in flight; nothing was sent.
    Busy,
    /// Cancelled before an outcome arrived; the result was discarded.
    Cancelled,
    /// The form did not validate; nothing was sent.
    Invalid(Validation),
}

impl SubmitStatus {
    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        match self {
            SubmitStatus::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn into_outcome(self) -> Option<PredictionOutcome> {
        match self {
            SubmitStatus::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Cancels whatever submission is in flight on the client it came from.
#[derive(Clone)]
pub struct CancelHandle {
    pub(crate) machine: StateMachine,
}

impl CancelHandle {
    /// Returns `true` if a submission was running and has been told to stop.
    pub fn cancel(&self) -> bool {
        self.machine.cancel_in_flight()
    }
}
