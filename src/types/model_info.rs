//! Model metadata exposed by the service's model-info endpoint

use serde::{Deserialize, Serialize};

/// Categorical values the deployed model was trained on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedFeatures {
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub soil_types: Vec<String>,
    #[serde(default)]
    pub crops: Vec<String>,
    #[serde(default)]
    pub weather_conditions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_status: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub training_date: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub supported_features: SupportedFeatures,
}
