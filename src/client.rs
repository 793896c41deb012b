//! Prediction client.
//!
//! Keep the public surface small and predictable; implementation details are
//! split into submodules under `src/client/`.

pub mod builder;
mod classify;
pub mod core;
pub mod state;
pub mod types;

pub use builder::PredictionClientBuilder;
pub use core::PredictionClient;
pub use state::SubmissionState;
pub use types::{CancelHandle, SubmitStatus};
