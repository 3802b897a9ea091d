//! Yield prediction service

use serde_json::Value;
use shared::{
    validate_prediction_input, AdvisoryTables, PredictionRecord, PredictionResult, Recorded,
    YieldEstimator,
};
use std::{sync::Arc, time::Duration};

use super::persistence::{bounded, settle, SharedSink, DEFAULT_WRITE_TIMEOUT};
use crate::error::AppResult;

/// Validates a request, estimates yield, and attaches advice
#[derive(Clone)]
pub struct PredictionService {
    estimator: YieldEstimator,
    tables: Arc<AdvisoryTables>,
    sink: SharedSink,
    write_timeout: Duration,
}

impl PredictionService {
    pub fn new(estimator: YieldEstimator, tables: Arc<AdvisoryTables>, sink: SharedSink) -> Self {
        Self {
            estimator,
            tables,
            sink,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    pub fn with_write_timeout(mut self, write_timeout: Duration) -> Self {
        self.write_timeout = write_timeout;
        self
    }

    /// Produce a prediction and store it if a sink is available
    pub async fn predict(&self, raw: &Value) -> AppResult<Recorded<PredictionResult>> {
        let request = validate_prediction_input(raw)?;
        let result = PredictionResult::assemble(&request, &self.estimator, &self.tables);

        tracing::info!(
            crop = %request.crop,
            soil = %request.soil,
            area = request.area,
            rainfall = request.rainfall,
            yield_value = result.yield_value,
            category = result.category.as_str(),
            "Prediction computed"
        );

        let stored = match &self.sink {
            Some(sink) => {
                let record = PredictionRecord::new(&request.user_id, result.clone());
                Some(bounded(self.write_timeout, sink.record_prediction(&record)).await)
            }
            None => None,
        };

        Ok(Recorded::new(result, settle("prediction", stored)))
    }
}
