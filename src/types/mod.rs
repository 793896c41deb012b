//! 类型系统模块：预测请求、预测结果与模型信息。
//!
//! # Types Module
//!
//! Strongly-typed representations of everything that crosses the wire.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PredictionRequest`] | Validated submission, serialized with the service's field names |
//! | [`YesNo`] | `"TRUE"` / `"FALSE"` selection for fertilizer and irrigation |
//! | [`PredictionOutcome`] | Success / API error / transport error of one attempt |
//! | [`YieldEstimate`] | Successful prediction body |
//! | [`ModelInfo`] | Metadata from the model-info endpoint |

pub mod model_info;
pub mod outcome;
pub mod request;

pub use model_info::{ModelInfo, SupportedFeatures};
pub use outcome::{ConfidenceLevel, PredictionOutcome, YieldEstimate, NOT_AVAILABLE, UNKNOWN_ERROR};
pub use request::{PredictionRequest, YesNo};
