//! Gemini Client
//!
//! Client for the Google generative language `generateContent` API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::PromptFrame;
use std::time::Duration;

use super::{CompletionError, TextCompletion};
use crate::config::GeminiConfig;

/// Client for Gemini text generation
#[derive(Clone)]
pub struct GeminiClient {
    api_endpoint: String,
    api_key: String,
    model: String,
    http_client: Client,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response from `generateContent`
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &PromptFrame) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompt.system.clone()),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.user.clone()),
                }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(
        api_endpoint: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            api_key,
            model,
            http_client,
        })
    }

    /// Create a client from configuration; `None` when no API key is set
    pub fn from_config(config: &GeminiConfig) -> Option<Result<Self, CompletionError>> {
        let api_key = config.api_key.as_ref().filter(|k| !k.trim().is_empty())?;

        Some(Self::new(
            config.api_endpoint.clone(),
            api_key.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_endpoint, self.model)
    }
}

#[async_trait]
impl TextCompletion for GeminiClient {
    async fn complete(&self, prompt: &PromptFrame) -> Result<String, CompletionError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .http_client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        result.text().ok_or(CompletionError::EmptyResponse)
    }
}
