//! Yield prediction HTTP handlers

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use shared::{PredictionResult, ValidationError};

use super::parse_body;
use crate::error::AppResult;
use crate::services::PredictionService;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub data: PredictionResult,
}

/// Estimate yield and advice for a field
/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<PredictResponse>> {
    let raw = parse_body(&body).ok_or(ValidationError::InvalidFormat)?;

    let service = PredictionService::new(
        state.estimator.clone(),
        state.advisory.clone(),
        state.sink.clone(),
    )
    .with_write_timeout(state.config.write_timeout());
    let recorded = service.predict(&raw).await?;

    Ok(Json(PredictResponse {
        success: true,
        data: recorded.into_value(),
    }))
}
