//! Per-field validation rules.
//!
//! Every rule takes the raw draft and returns either `Ok(())` or a message
//! that can be shown next to the field.

use crate::types::YesNo;

pub type RuleResult = std::result::Result<(), String>;

/// Which rule a field is checked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Text,
    Float,
    Integer,
    Choice,
}

pub fn required_text(label: &str, value: &str) -> RuleResult {
    if value.trim().is_empty() {
        return Err(format!("Please enter {}", label));
    }
    Ok(())
}

pub fn required_float(label: &str, value: &str) -> RuleResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("Please enter {}", label));
    }
    match trimmed.parse::<f64>() {
        // "inf" and "NaN" parse but cannot be sent as JSON numbers
        Ok(v) if v.is_finite() => Ok(()),
        _ => Err(format!("{} must be a valid number", capitalize(label))),
    }
}

pub fn required_integer(label: &str, value: &str) -> RuleResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("Please enter {}", label));
    }
    if trimmed.parse::<i64>().is_err() {
        return Err(format!("{} must be a whole number", capitalize(label)));
    }
    Ok(())
}

pub fn required_choice(label: &str, value: Option<YesNo>) -> RuleResult {
    match value {
        Some(_) => Ok(()),
        None => Err(format!("Please select whether {}", label)),
    }
}

/// Lenient conversions used when building the request.
///
/// Validation already guarantees these parse; the zero fallback only exists
/// so request construction stays total.
pub(crate) fn float_or_zero(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub(crate) fn integer_or_zero(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
