//! Response classification
//!
//! Turns a completed HTTP exchange into a [`PredictionOutcome`]. Pure, so the
//! whole response contract is testable without a server.

use crate::transport::RawResponse;
use crate::types::{ConfidenceLevel, PredictionOutcome, YieldEstimate, UNKNOWN_ERROR};
use serde_json::Value;
use tracing::warn;

const YIELD_FIELD: &str = "predicted_yield_tons_per_hectare";
const ERROR_MESSAGE_FIELD: &str = "error_message";

/// Only 200 is a success; every other status is an API error.
pub(crate) fn interpret(raw: &RawResponse) -> PredictionOutcome {
    if raw.status == 200 {
        interpret_success(&raw.body)
    } else {
        interpret_failure(raw.status, &raw.body)
    }
}

fn interpret_success(body: &str) -> PredictionOutcome {
    let json: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            // A 200 we cannot read is an infrastructure problem, not a rejection.
            warn!(error = %e, "prediction response body is not valid JSON");
            return PredictionOutcome::transport_error(UNKNOWN_ERROR);
        }
    };

    let tons_per_hectare = json.get(YIELD_FIELD).and_then(Value::as_f64);
    if tons_per_hectare.is_none() {
        warn!("prediction response has no {}", YIELD_FIELD);
    }

    PredictionOutcome::Success(YieldEstimate {
        tons_per_hectare,
        confidence_level: json
            .get("confidence_level")
            .and_then(Value::as_str)
            .and_then(ConfidenceLevel::parse),
        model_version: json
            .get("model_version")
            .and_then(Value::as_str)
            .map(str::to_string),
        processing_time_ms: json.get("processing_time_ms").and_then(Value::as_f64),
    })
}

fn interpret_failure(status: u16, body: &str) -> PredictionOutcome {
    let json: Option<Value> = serde_json::from_str(body).ok();
    let error_code = json
        .as_ref()
        .and_then(|j| j.get("error_code"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let suggestions = json
        .as_ref()
        .and_then(|j| j.get("suggestions"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    PredictionOutcome::ApiError {
        status_code: status,
        message: error_message_from_body(body),
        error_code,
        suggestions,
    }
}

/// `error_message` from a JSON body, or `"Unknown error"`.
pub(crate) fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get(ERROR_MESSAGE_FIELD)
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
