//! Yield prediction models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::advisory::{Advisory, AdvisoryTables};
use crate::estimator::YieldEstimator;

/// A validated prediction request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    pub crop: String,
    pub soil: String,
    /// Cultivated area in hectares, always > 0
    pub area: f64,
    /// Expected rainfall in millimetres, always >= 0
    pub rainfall: f64,
    pub user_id: String,
}

/// Qualitative yield bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum YieldCategory {
    Low,
    Medium,
    High,
}

/// Yield at or above which a prediction is `High`
pub const HIGH_YIELD_THRESHOLD: f64 = 8.0;

/// Yield at or above which a prediction is `Medium`
pub const MEDIUM_YIELD_THRESHOLD: f64 = 4.0;

impl YieldCategory {
    /// Classify a yield value, evaluated top-down
    pub fn from_yield(yield_value: f64) -> Self {
        if yield_value >= HIGH_YIELD_THRESHOLD {
            YieldCategory::High
        } else if yield_value >= MEDIUM_YIELD_THRESHOLD {
            YieldCategory::Medium
        } else {
            YieldCategory::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            YieldCategory::Low => "Low",
            YieldCategory::Medium => "Medium",
            YieldCategory::High => "High",
        }
    }
}

/// Prediction response: the validated inputs plus the estimate and advice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub crop: String,
    pub soil: String,
    pub area: f64,
    pub rainfall: f64,
    #[serde(rename = "yield")]
    pub yield_value: f64,
    pub category: YieldCategory,
    pub suggestions: Advisory,
}

impl PredictionResult {
    /// Run the estimator and the advisory generator for a validated request
    pub fn assemble(
        request: &PredictionRequest,
        estimator: &YieldEstimator,
        tables: &AdvisoryTables,
    ) -> Self {
        let (yield_value, category) = estimator.estimate(request.area);
        let suggestions = tables.advise(&request.soil, request.area, request.rainfall);

        Self {
            crop: request.crop.clone(),
            soil: request.soil.clone(),
            area: request.area,
            rainfall: request.rainfall,
            yield_value,
            category,
            suggestions,
        }
    }
}

/// Denormalized prediction as handed to the persistence sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub user: String,
    pub data: PredictionResult,
    pub timestamp: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(user: impl Into<String>, data: PredictionResult) -> Self {
        Self {
            user: user.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::FixedRandom;

    fn request(soil: &str, area: f64, rainfall: f64) -> PredictionRequest {
        PredictionRequest {
            crop: "Rice".to_string(),
            soil: soil.to_string(),
            area,
            rainfall,
            user_id: "farmer-1".to_string(),
        }
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(YieldCategory::from_yield(8.0), YieldCategory::High);
        assert_eq!(YieldCategory::from_yield(7.99), YieldCategory::Medium);
        assert_eq!(YieldCategory::from_yield(4.0), YieldCategory::Medium);
        assert_eq!(YieldCategory::from_yield(3.99), YieldCategory::Low);
        assert_eq!(YieldCategory::from_yield(0.0), YieldCategory::Low);
    }

    #[test]
    fn test_assemble_echoes_request() {
        let estimator = YieldEstimator::new(FixedRandom(2.0));
        let tables = AdvisoryTables::default();
        let result = PredictionResult::assemble(&request("Loamy", 10.0, 30.0), &estimator, &tables);

        assert_eq!(result.crop, "Rice");
        assert_eq!(result.soil, "Loamy");
        assert_eq!(result.area, 10.0);
        assert_eq!(result.rainfall, 30.0);
        assert_eq!(result.yield_value, 20.0);
        assert_eq!(result.category, YieldCategory::High);
        assert_eq!(result.suggestions.fertilizer, "600 kg NPK per season.");
    }

    #[test]
    fn test_result_serializes_yield_key() {
        let estimator = YieldEstimator::new(FixedRandom(1.5));
        let tables = AdvisoryTables::default();
        let result = PredictionResult::assemble(&request("clay", 2.0, 100.0), &estimator, &tables);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["yield"], serde_json::json!(3.0));
        assert_eq!(json["category"], "Low");
        assert!(json["suggestions"]["soil_tips"].is_string());
        assert!(json.get("yield_value").is_none());
    }
}
