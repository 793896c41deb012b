//! Terminal result of a single submission attempt

use serde::{Deserialize, Serialize};
use std::fmt;

/// Displayed in place of a yield the service did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Message used whenever the service gives no usable error description.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Coarse confidence band reported alongside a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Band used by the service: up to 10 t/ha is High, up to 20 is Medium.
    pub fn for_yield(tons_per_hectare: f64) -> Self {
        if (0.0..=10.0).contains(&tons_per_hectare) {
            ConfidenceLevel::High
        } else if tons_per_hectare > 10.0 && tons_per_hectare <= 20.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(ConfidenceLevel::High),
            "medium" => Some(ConfidenceLevel::Medium),
            "low" => Some(ConfidenceLevel::Low),
            _ => None,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Body of a successful prediction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YieldEstimate {
    /// `None` when the service omitted `predicted_yield_tons_per_hectare`.
    pub tons_per_hectare: Option<f64>,
    pub confidence_level: Option<ConfidenceLevel>,
    pub model_version: Option<String>,
    pub processing_time_ms: Option<f64>,
}

impl YieldEstimate {
    pub fn new(tons_per_hectare: f64) -> Self {
        Self {
            tons_per_hectare: Some(tons_per_hectare),
            ..Self::default()
        }
    }

    /// Yield rounded to two decimals, as presented to the user.
    pub fn rounded(&self) -> Option<f64> {
        self.tons_per_hectare.map(|v| (v * 100.0).round() / 100.0)
    }

    /// Reported confidence, or the band derived from the yield value.
    pub fn confidence(&self) -> Option<ConfidenceLevel> {
        self.confidence_level
            .or_else(|| self.tons_per_hectare.map(ConfidenceLevel::for_yield))
    }

    /// e.g. `"4.57 tons/ha"`, or `"N/A"` when the value is missing.
    pub fn display_text(&self) -> String {
        match self.tons_per_hectare {
            Some(v) => format!("{:.2} tons/ha", v),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Outcome of exactly one submission. Consumed once by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(YieldEstimate),
    /// The service answered with a non-200 status.
    ApiError {
        status_code: u16,
        message: String,
        error_code: Option<String>,
        suggestions: Vec<String>,
    },
    /// The exchange never completed: timeout, connectivity, or a malformed body.
    TransportError { message: String },
}

impl PredictionOutcome {
    pub fn api_error(status_code: u16, message: impl Into<String>) -> Self {
        PredictionOutcome::ApiError {
            status_code,
            message: message.into(),
            error_code: None,
            suggestions: Vec::new(),
        }
    }

    pub fn transport_error(message: impl Into<String>) -> Self {
        PredictionOutcome::TransportError {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success(_))
    }

    /// User-facing message for failures; `None` on success.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            PredictionOutcome::Success(_) => None,
            PredictionOutcome::ApiError { message, .. }
            | PredictionOutcome::TransportError { message } => Some(message),
        }
    }
}
