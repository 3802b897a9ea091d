//! External API integrations

pub mod gemini;

use async_trait::async_trait;
use shared::PromptFrame;
use thiserror::Error;

pub use gemini::GeminiClient;

/// Errors from a text completion backend
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion backend is not configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Response contained no text")]
    EmptyResponse,
}

/// Opaque text completion capability
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &PromptFrame) -> Result<String, CompletionError>;
}

/// Stand-in used when no API key is configured; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCompletion;

#[async_trait]
impl TextCompletion for DisabledCompletion {
    async fn complete(&self, _prompt: &PromptFrame) -> Result<String, CompletionError> {
        Err(CompletionError::NotConfigured)
    }
}
