//! HTTP transport for the prediction service.

pub mod http;

pub use http::{HttpTransport, RawResponse};

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Other(String),
}
