//! Chat support HTTP handlers

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use shared::ValidationError;

use super::parse_body;
use crate::error::AppResult;
use crate::services::ChatService;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
}

/// Answer a farming question
/// POST /api/chat-support
///
/// An unreadable body has no message, so it is rejected as an empty one.
pub async fn chat_support(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ChatResponse>> {
    let raw = parse_body(&body).ok_or(ValidationError::EmptyMessage)?;

    let service = ChatService::new(state.completion.clone(), state.sink.clone())
        .with_write_timeout(state.config.write_timeout());
    let recorded = service.ask(&raw).await?;

    Ok(Json(ChatResponse {
        success: true,
        reply: recorded.into_value().reply,
    }))
}
