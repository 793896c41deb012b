//! Input collection: draft values for the nine prediction fields.
//!
//! [`FormState`] is a plain value. Each update returns a new state, so the
//! presentation layer owns rendering and focus while this module owns rules.
//!
//! ```rust
//! use crop_yield_client::form::{Field, FormState};
//!
//! let form = FormState::new()
//!     .with_region("North")
//!     .with_soil_type("Loam")
//!     .with_crop("Wheat")
//!     .with_rainfall_mm("500")
//!     .with_temperature_celsius("25")
//!     .with_weather_condition("Sunny")
//!     .with_days_to_harvest("120");
//!
//! let request = form.to_request().expect("all fields valid");
//! assert_eq!(request.days_to_harvest(), 120);
//!
//! let blank = form.with_text(Field::Crop, "  ");
//! assert!(blank.validate().error_for(Field::Crop).is_some());
//! ```

pub mod rules;

use crate::types::{PredictionRequest, YesNo};
use rules::Rule;
use std::collections::BTreeMap;
use std::fmt;

/// The nine inputs, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Region,
    SoilType,
    Crop,
    RainfallMm,
    TemperatureCelsius,
    FertilizerUsed,
    IrrigationUsed,
    WeatherCondition,
    DaysToHarvest,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Region,
        Field::SoilType,
        Field::Crop,
        Field::RainfallMm,
        Field::TemperatureCelsius,
        Field::FertilizerUsed,
        Field::IrrigationUsed,
        Field::WeatherCondition,
        Field::DaysToHarvest,
    ];

    /// Key used in the request body.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::Region => "Region",
            Field::SoilType => "Soil_Type",
            Field::Crop => "Crop",
            Field::RainfallMm => "Rainfall_mm",
            Field::TemperatureCelsius => "Temperature_Celsius",
            Field::FertilizerUsed => "Fertilizer_Used",
            Field::IrrigationUsed => "Irrigation_Used",
            Field::WeatherCondition => "Weather_Condition",
            Field::DaysToHarvest => "Days_to_Harvest",
        }
    }

    /// Phrase used inside validation messages.
    fn label(&self) -> &'static str {
        match self {
            Field::Region => "the region",
            Field::SoilType => "the soil type",
            Field::Crop => "the crop",
            Field::RainfallMm => "rainfall (mm)",
            Field::TemperatureCelsius => "temperature (°C)",
            Field::FertilizerUsed => "fertilizer was used",
            Field::IrrigationUsed => "irrigation was used",
            Field::WeatherCondition => "the weather condition",
            Field::DaysToHarvest => "days to harvest",
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Field::Region | Field::SoilType | Field::Crop | Field::WeatherCondition => Rule::Text,
            Field::RainfallMm | Field::TemperatureCelsius => Rule::Float,
            Field::DaysToHarvest => Rule::Integer,
            Field::FertilizerUsed | Field::IrrigationUsed => Rule::Choice,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Immutable snapshot of the form drafts.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    region: String,
    soil_type: String,
    crop: String,
    rainfall_mm: String,
    temperature_celsius: String,
    fertilizer_used: Option<YesNo>,
    irrigation_used: Option<YesNo>,
    weather_condition: String,
    days_to_harvest: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            region: String::new(),
            soil_type: String::new(),
            crop: String::new(),
            rainfall_mm: String::new(),
            temperature_celsius: String::new(),
            fertilizer_used: Some(YesNo::True),
            irrigation_used: Some(YesNo::False),
            weather_condition: String::new(),
            days_to_harvest: String::new(),
        }
    }
}

impl FormState {
    /// Empty drafts; fertilizer defaults to TRUE and irrigation to FALSE.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(self, value: impl Into<String>) -> Self {
        Self {
            region: value.into(),
            ..self
        }
    }

    pub fn with_soil_type(self, value: impl Into<String>) -> Self {
        Self {
            soil_type: value.into(),
            ..self
        }
    }

    pub fn with_crop(self, value: impl Into<String>) -> Self {
        Self {
            crop: value.into(),
            ..self
        }
    }

    pub fn with_rainfall_mm(self, value: impl Into<String>) -> Self {
        Self {
            rainfall_mm: value.into(),
            ..self
        }
    }

    pub fn with_temperature_celsius(self, value: impl Into<String>) -> Self {
        Self {
            temperature_celsius: value.into(),
            ..self
        }
    }

    pub fn with_fertilizer_used(self, value: Option<YesNo>) -> Self {
        Self {
            fertilizer_used: value,
            ..self
        }
    }

    pub fn with_irrigation_used(self, value: Option<YesNo>) -> Self {
        Self {
            irrigation_used: value,
            ..self
        }
    }

    pub fn with_weather_condition(self, value: impl Into<String>) -> Self {
        Self {
            weather_condition: value.into(),
            ..self
        }
    }

    pub fn with_days_to_harvest(self, value: impl Into<String>) -> Self {
        Self {
            days_to_harvest: value.into(),
            ..self
        }
    }

    /// Update any field from raw text.
    ///
    /// For the two choice fields an empty string clears the selection and
    /// anything that is not TRUE/FALSE (case-insensitive) leaves it unselected.
    pub fn with_text(self, field: Field, value: &str) -> Self {
        match field {
            Field::Region => self.with_region(value),
            Field::SoilType => self.with_soil_type(value),
            Field::Crop => self.with_crop(value),
            Field::RainfallMm => self.with_rainfall_mm(value),
            Field::TemperatureCelsius => self.with_temperature_celsius(value),
            Field::FertilizerUsed => self.with_fertilizer_used(value.parse().ok()),
            Field::IrrigationUsed => self.with_irrigation_used(value.parse().ok()),
            Field::WeatherCondition => self.with_weather_condition(value),
            Field::DaysToHarvest => self.with_days_to_harvest(value),
        }
    }

    /// Current draft of a text field; choice fields render as TRUE/FALSE or "".
    pub fn text(&self, field: Field) -> String {
        match field {
            Field::Region => self.region.clone(),
            Field::SoilType => self.soil_type.clone(),
            Field::Crop => self.crop.clone(),
            Field::RainfallMm => self.rainfall_mm.clone(),
            Field::TemperatureCelsius => self.temperature_celsius.clone(),
            Field::FertilizerUsed => self.choice_text(self.fertilizer_used),
            Field::IrrigationUsed => self.choice_text(self.irrigation_used),
            Field::WeatherCondition => self.weather_condition.clone(),
            Field::DaysToHarvest => self.days_to_harvest.clone(),
        }
    }

    fn choice_text(&self, value: Option<YesNo>) -> String {
        value.map(|v| v.as_str().to_string()).unwrap_or_default()
    }

    pub fn fertilizer_used(&self) -> Option<YesNo> {
        self.fertilizer_used
    }

    pub fn irrigation_used(&self) -> Option<YesNo> {
        self.irrigation_used
    }

    /// Check a single field.
    pub fn validate_field(&self, field: Field) -> rules::RuleResult {
        let label = field.label();
        match field.rule() {
            Rule::Text => rules::required_text(label, &self.text(field)),
            Rule::Float => rules::required_float(label, &self.text(field)),
            Rule::Integer => rules::required_integer(label, &self.text(field)),
            Rule::Choice => {
                let value = if field == Field::FertilizerUsed {
                    self.fertilizer_used
                } else {
                    self.irrigation_used
                };
                rules::required_choice(label, value)
            }
        }
    }

    /// Run every field rule. All nine are checked so each failing field gets
    /// its own message.
    pub fn validate(&self) -> Validation {
        let errors = Field::ALL
            .iter()
            .filter_map(|field| self.validate_field(*field).err().map(|msg| (*field, msg)))
            .collect();
        Validation { errors }
    }

    /// Build a fresh request, or return the failing fields.
    pub fn to_request(&self) -> std::result::Result<PredictionRequest, Validation> {
        let validation = self.validate();
        if !validation.is_valid() {
            return Err(validation);
        }

        // Rules passed, so the zero fallbacks and the choice defaults below
        // are never taken.
        Ok(PredictionRequest {
            region: self.region.trim().to_string(),
            soil_type: self.soil_type.trim().to_string(),
            crop: self.crop.trim().to_string(),
            rainfall_mm: rules::float_or_zero(&self.rainfall_mm),
            temperature_celsius: rules::float_or_zero(&self.temperature_celsius),
            fertilizer_used: self.fertilizer_used.unwrap_or(YesNo::True),
            irrigation_used: self.irrigation_used.unwrap_or(YesNo::False),
            weather_condition: self.weather_condition.trim().to_string(),
            days_to_harvest: rules::integer_or_zero(&self.days_to_harvest),
        })
    }
}

/// Result of [`FormState::validate`]: one message per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    errors: BTreeMap<Field, String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(|s| s.as_str())
    }

    /// Failing fields in form order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}
