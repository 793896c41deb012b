//! # crop-yield-client
//!
//! 作物产量预测服务的类型化客户端。
//!
//! Typed client for the crop yield prediction service.
//!
//! ## Overview
//!
//! The crate covers the prediction request lifecycle end to end:
//!
//! - **Input collection**: [`form::FormState`] holds the nine drafts and their
//!   validation rules; no request exists until every field passes.
//! - **Submission**: [`PredictionClient`] serializes a [`PredictionRequest`],
//!   makes one bounded-time POST and classifies the reply.
//! - **Presentation**: each terminal [`PredictionOutcome`] is handed to an
//!   [`OutcomeSink`]; `is_submitting` drives the submit control.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crop_yield_client::{FormState, PredictionClient, SubmitStatus};
//!
//! #[tokio::main]
//! async fn main() -> crop_yield_client::Result<()> {
//!     let client = PredictionClient::builder().build()?;
//!
//!     let form = FormState::new()
//!         .with_region("North")
//!         .with_soil_type("Loam")
//!         .with_crop("Wheat")
//!         .with_rainfall_mm("500")
//!         .with_temperature_celsius("25")
//!         .with_weather_condition("Sunny")
//!         .with_days_to_harvest("120");
//!
//!     match form.to_request() {
//!         Ok(request) => {
//!             if let SubmitStatus::Completed(outcome) = client.submit(request).await {
//!                 println!("{:?}", outcome);
//!             }
//!         }
//!         Err(validation) => eprintln!("{}", validation),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`form`] | Draft values and per-field validation |
//! | [`client`] | Submission lifecycle, state machine, cancellation |
//! | [`config`] | Endpoint and timeout configuration |
//! | [`presentation`] | Outcome callbacks for the UI layer |
//! | [`session`] | A screen combining form, surfaced errors and client |
//! | [`transport`] | HTTP exchange |
//! | [`types`] | Request, outcome and model-info types |

pub mod client;
pub mod config;
pub mod form;
pub mod presentation;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{CancelHandle, PredictionClient, PredictionClientBuilder, SubmissionState, SubmitStatus};
pub use config::ClientConfig;
pub use form::{Field, FormState, Validation};
pub use presentation::{OutcomeSink, InMemoryOutcomeSink, Notification};
pub use session::PredictionScreen;
pub use types::{
    ConfidenceLevel, ModelInfo, PredictionOutcome, PredictionRequest, YesNo, YieldEstimate,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
