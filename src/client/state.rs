//! Submission state machine.
//!
//! `Idle -> Submitting -> {Succeeded, Failed}`. A new submission from a
//! terminal state passes through `Idle` again. At most one submission is in
//! flight per machine; the check and the transition happen under one lock.

use crate::types::PredictionOutcome;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        };
        f.write_str(s)
    }
}

struct Slot {
    state: SubmissionState,
    in_flight: Option<InFlight>,
    next_id: u64,
}

struct InFlight {
    id: u64,
    token: CancellationToken,
}

struct Inner {
    slot: Mutex<Slot>,
    submitting: watch::Sender<bool>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Slot {
    fn transition(&mut self, next: SubmissionState) {
        debug!(from = %self.state, to = %next, "submission state transition");
        self.state = next;
    }
}

#[derive(Clone)]
pub(crate) struct StateMachine {
    inner: Arc<Inner>,
}

impl StateMachine {
    pub fn new() -> Self {
        let (submitting, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(Slot {
                    state: SubmissionState::Idle,
                    in_flight: None,
                    next_id: 0,
                }),
                submitting,
            }),
        }
    }

    pub fn state(&self) -> SubmissionState {
        lock(&self.inner.slot).state
    }

    pub fn is_submitting(&self) -> bool {
        *self.inner.submitting.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.submitting.subscribe()
    }

    /// Enter `Submitting`, or `None` if a submission is already in flight.
    pub fn try_begin(&self) -> Option<SubmittingGuard> {
        let mut slot = lock(&self.inner.slot);
        if slot.state == SubmissionState::Submitting {
            return None;
        }
        if slot.state.is_terminal() {
            slot.transition(SubmissionState::Idle);
        }
        slot.transition(SubmissionState::Submitting);

        let id = slot.next_id;
        slot.next_id = slot.next_id.wrapping_add(1);
        let token = CancellationToken::new();
        slot.in_flight = Some(InFlight {
            id,
            token: token.clone(),
        });
        self.inner.submitting.send_replace(true);

        Some(SubmittingGuard {
            inner: Arc::clone(&self.inner),
            id,
            token,
            released: false,
        })
    }

    /// Cancel the in-flight submission, if any. Returns whether one was running.
    pub fn cancel_in_flight(&self) -> bool {
        match lock(&self.inner.slot).in_flight.as_ref() {
            Some(in_flight) => {
                in_flight.token.cancel();
                true
            }
            None => false,
        }
    }
}

/// Held for the lifetime of one submission.
///
/// Dropping it clears the submitting flag whatever happened: completion,
/// cancellation, or the future being dropped mid-flight.
pub(crate) struct SubmittingGuard {
    inner: Arc<Inner>,
    id: u64,
    token: CancellationToken,
    released: bool,
}

impl SubmittingGuard {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Record the terminal state for `outcome` and release the guard.
    pub fn finish(mut self, outcome: &PredictionOutcome) {
        let next = if outcome.is_success() {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        };
        self.release(next);
    }

    /// State, token slot and flag change in one critical section. A guard
    /// whose submission is no longer in the slot leaves it untouched.
    fn release(&mut self, next: SubmissionState) {
        if self.released {
            return;
        }
        self.released = true;
        let mut slot = lock(&self.inner.slot);
        if slot.in_flight.as_ref().map(|f| f.id) != Some(self.id) {
            return;
        }
        slot.transition(next);
        slot.in_flight = None;
        self.inner.submitting.send_replace(false);
    }
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        // abandoned before an outcome: the result is discarded
        self.release(SubmissionState::Idle);
    }
}
