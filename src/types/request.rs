//! Prediction request payload based on the service's input schema

use crate::error::{Error, ErrorContext};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Two-valued selection used by the fertilizer and irrigation fields.
///
/// Serialized as the literal strings `"TRUE"` / `"FALSE"` expected by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum YesNo {
    #[serde(rename = "TRUE")]
    True,
    #[serde(rename = "FALSE")]
    False,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::True => "TRUE",
            YesNo::False => "FALSE",
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::True
        } else {
            YesNo::False
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YesNo {
    type Err = String;

    /// Case-insensitive, matching what the service accepts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRUE" => Ok(YesNo::True),
            "FALSE" => Ok(YesNo::False),
            other => Err(format!("expected TRUE or FALSE, got '{}'", other)),
        }
    }
}

/// A validated, typed submission.
///
/// Built by [`FormState::to_request`](crate::form::FormState::to_request)
/// once every field has passed its rule; there is no public constructor.
/// Field names on the wire follow the service schema exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "Region")]
    pub(crate) region: String,
    #[serde(rename = "Soil_Type")]
    pub(crate) soil_type: String,
    #[serde(rename = "Crop")]
    pub(crate) crop: String,
    #[serde(rename = "Rainfall_mm")]
    pub(crate) rainfall_mm: f64,
    #[serde(rename = "Temperature_Celsius")]
    pub(crate) temperature_celsius: f64,
    #[serde(rename = "Fertilizer_Used")]
    pub(crate) fertilizer_used: YesNo,
    #[serde(rename = "Irrigation_Used")]
    pub(crate) irrigation_used: YesNo,
    #[serde(rename = "Weather_Condition")]
    pub(crate) weather_condition: String,
    #[serde(rename = "Days_to_Harvest")]
    pub(crate) days_to_harvest: i64,
}

impl PredictionRequest {
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn soil_type(&self) -> &str {
        &self.soil_type
    }

    pub fn crop(&self) -> &str {
        &self.crop
    }

    pub fn rainfall_mm(&self) -> f64 {
        self.rainfall_mm
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    pub fn fertilizer_used(&self) -> YesNo {
        self.fertilizer_used
    }

    pub fn irrigation_used(&self) -> YesNo {
        self.irrigation_used
    }

    pub fn weather_condition(&self) -> &str {
        &self.weather_condition
    }

    pub fn days_to_harvest(&self) -> i64 {
        self.days_to_harvest
    }

    /// Serialize into the JSON object posted to the prediction endpoint.
    ///
    /// Blank text and non-finite numbers are refused rather than sent;
    /// serde_json would otherwise write NaN as `null`.
    pub fn to_payload(&self) -> crate::Result<serde_json::Value> {
        self.check()?;
        Ok(serde_json::to_value(self)?)
    }

    fn check(&self) -> crate::Result<()> {
        let texts = [
            ("Region", &self.region),
            ("Soil_Type", &self.soil_type),
            ("Crop", &self.crop),
            ("Weather_Condition", &self.weather_condition),
        ];
        for (name, value) in texts {
            if value.trim().is_empty() {
                return Err(invalid(name, "must not be blank"));
            }
        }
        let numbers = [
            ("Rainfall_mm", self.rainfall_mm),
            ("Temperature_Celsius", self.temperature_celsius),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(invalid(name, format!("must be a finite number, got {}", value)));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, details: impl Into<String>) -> Error {
    Error::InvalidRequest {
        message: "request cannot be sent".to_string(),
        context: ErrorContext::new()
            .with_field_path(field)
            .with_details(details)
            .with_source("prediction_request"),
    }
}
