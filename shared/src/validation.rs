//! Input validation for prediction and chat requests
//!
//! Requests arrive as loosely typed JSON. Numeric fields may be sent as
//! numbers or numeric strings; text fields are trimmed.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{ChatRequest, PredictionRequest};
use crate::types::{ANONYMOUS_USER, DEFAULT_LANGUAGE};

/// Caller-side input problems. The display text is what the caller sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input format")]
    InvalidFormat,

    #[error("Area must be > 0")]
    NonPositiveArea,

    #[error("Rainfall cannot be negative")]
    NegativeRainfall,

    #[error("Empty message")]
    EmptyMessage,
}

// ============================================================================
// Prediction
// ============================================================================

/// Validate a raw prediction body
///
/// A missing `area` or `rainfall` counts as zero, so a missing area is
/// reported as a non-positive area. Any value that is not a finite number or
/// a numeric string is an invalid format. No upper bounds are enforced.
pub fn validate_prediction_input(raw: &Value) -> Result<PredictionRequest, ValidationError> {
    let fields = raw.as_object().ok_or(ValidationError::InvalidFormat)?;

    let crop = text_field(fields, "crop")?;
    let soil = text_field(fields, "soil")?;
    let area = number_field(fields, "area")?;
    let rainfall = number_field(fields, "rainfall")?;
    let user_id = user_id_field(fields);

    validate_area(area)?;
    validate_rainfall(rainfall)?;

    Ok(PredictionRequest {
        crop,
        soil,
        area,
        rainfall,
        user_id,
    })
}

pub fn validate_area(area: f64) -> Result<(), ValidationError> {
    if area <= 0.0 {
        return Err(ValidationError::NonPositiveArea);
    }
    Ok(())
}

pub fn validate_rainfall(rainfall: f64) -> Result<(), ValidationError> {
    if rainfall < 0.0 {
        return Err(ValidationError::NegativeRainfall);
    }
    Ok(())
}

// ============================================================================
// Chat
// ============================================================================

/// Validate a raw chat body
pub fn validate_chat_input(raw: &Value) -> Result<ChatRequest, ValidationError> {
    let fields = raw.as_object().ok_or(ValidationError::EmptyMessage)?;

    let message = match fields.get("message") {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    };
    if message.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }

    let lang = match fields.get("lang") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    };

    Ok(ChatRequest {
        message,
        lang,
        user_id: user_id_field(fields),
    })
}

// ============================================================================
// Field helpers
// ============================================================================

fn text_field(fields: &Map<String, Value>, name: &str) -> Result<String, ValidationError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(ValidationError::InvalidFormat),
    }
}

fn number_field(fields: &Map<String, Value>, name: &str) -> Result<f64, ValidationError> {
    let value = match fields.get(name) {
        None => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::InvalidFormat),
    }
}

fn user_id_field(fields: &Map<String, Value>) -> String {
    match fields.get("user_id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => ANONYMOUS_USER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_prediction_valid() {
        let request = validate_prediction_input(&json!({
            "crop": "  Wheat ",
            "soil": " Loamy",
            "area": 10,
            "rainfall": 30.5,
            "user_id": "farmer-7"
        }))
        .unwrap();

        assert_eq!(request.crop, "Wheat");
        assert_eq!(request.soil, "Loamy");
        assert_eq!(request.area, 10.0);
        assert_eq!(request.rainfall, 30.5);
        assert_eq!(request.user_id, "farmer-7");
    }

    #[test]
    fn test_validate_prediction_numeric_strings() {
        let request = validate_prediction_input(&json!({
            "area": " 2.5 ",
            "rainfall": "120"
        }))
        .unwrap();

        assert_eq!(request.area, 2.5);
        assert_eq!(request.rainfall, 120.0);
        assert_eq!(request.crop, "");
        assert_eq!(request.soil, "");
        assert_eq!(request.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn test_validate_prediction_zero_area() {
        let result = validate_prediction_input(&json!({ "area": 0, "rainfall": 10 }));
        assert_eq!(result, Err(ValidationError::NonPositiveArea));
        assert_eq!(result.unwrap_err().to_string(), "Area must be > 0");
    }

    #[test]
    fn test_validate_prediction_negative_area() {
        let result = validate_prediction_input(&json!({ "area": -3, "rainfall": 10 }));
        assert_eq!(result, Err(ValidationError::NonPositiveArea));
    }

    #[test]
    fn test_validate_prediction_negative_rainfall() {
        let result = validate_prediction_input(&json!({ "area": 1, "rainfall": -1 }));
        assert_eq!(result, Err(ValidationError::NegativeRainfall));
        assert_eq!(result.unwrap_err().to_string(), "Rainfall cannot be negative");
    }

    #[test]
    fn test_validate_prediction_zero_rainfall_is_valid() {
        assert!(validate_prediction_input(&json!({ "area": 1, "rainfall": 0 })).is_ok());
    }

    #[test]
    fn test_validate_prediction_missing_area() {
        let result = validate_prediction_input(&json!({ "rainfall": 10 }));
        assert_eq!(result, Err(ValidationError::NonPositiveArea));
    }

    #[test]
    fn test_validate_prediction_non_numeric_area() {
        for area in [json!("ten"), json!(null), json!(true), json!([1]), json!({"ha": 1})] {
            let result = validate_prediction_input(&json!({ "area": area, "rainfall": 10 }));
            assert_eq!(result, Err(ValidationError::InvalidFormat));
        }
    }

    #[test]
    fn test_validate_prediction_non_finite_strings() {
        for area in ["NaN", "inf", "-inf"] {
            let result = validate_prediction_input(&json!({ "area": area, "rainfall": 10 }));
            assert_eq!(result, Err(ValidationError::InvalidFormat));
        }
    }

    #[test]
    fn test_validate_prediction_non_string_soil() {
        let result = validate_prediction_input(&json!({ "soil": 4, "area": 1, "rainfall": 1 }));
        assert_eq!(result, Err(ValidationError::InvalidFormat));
    }

    #[test]
    fn test_validate_prediction_not_an_object() {
        assert_eq!(
            validate_prediction_input(&json!([1, 2])),
            Err(ValidationError::InvalidFormat)
        );
        assert_eq!(
            validate_prediction_input(&json!("area=1")),
            Err(ValidationError::InvalidFormat)
        );
    }

    #[test]
    fn test_validate_prediction_accepts_huge_values() {
        let request =
            validate_prediction_input(&json!({ "area": 1.0e9, "rainfall": 1.0e7 })).unwrap();
        assert_eq!(request.area, 1.0e9);
    }

    #[test]
    fn test_validate_prediction_numeric_user_id() {
        let request =
            validate_prediction_input(&json!({ "area": 1, "rainfall": 1, "user_id": 42 })).unwrap();
        assert_eq!(request.user_id, "42");
    }

    #[test]
    fn test_validate_chat_valid() {
        let request = validate_chat_input(&json!({
            "message": "  Best fertilizer for rice? ",
            "lang": " Tamil ",
            "user_id": "u1"
        }))
        .unwrap();

        assert_eq!(request.message, "Best fertilizer for rice?");
        assert_eq!(request.lang, "Tamil");
        assert_eq!(request.user_id, "u1");
    }

    #[test]
    fn test_validate_chat_defaults() {
        let request = validate_chat_input(&json!({ "message": "hello", "lang": "  " })).unwrap();
        assert_eq!(request.lang, DEFAULT_LANGUAGE);
        assert_eq!(request.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn test_validate_chat_empty_message() {
        for body in [
            json!({}),
            json!({ "message": "" }),
            json!({ "message": "   \n" }),
            json!({ "message": 12 }),
            json!(null),
        ] {
            assert_eq!(validate_chat_input(&body), Err(ValidationError::EmptyMessage));
        }
    }
}
