//! Farming chat support service

use serde_json::Value;
use shared::{validate_chat_input, ChatRecord, ChatResult, PromptFrame, Recorded};
use std::{sync::Arc, time::Duration};

use super::persistence::{bounded, settle, SharedSink, DEFAULT_WRITE_TIMEOUT};
use crate::error::{AppError, AppResult};
use crate::external::TextCompletion;

/// Answers farming questions through the completion backend
#[derive(Clone)]
pub struct ChatService {
    completion: Arc<dyn TextCompletion>,
    sink: SharedSink,
    write_timeout: Duration,
}

impl ChatService {
    pub fn new(completion: Arc<dyn TextCompletion>, sink: SharedSink) -> Self {
        Self {
            completion,
            sink,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    pub fn with_write_timeout(mut self, write_timeout: Duration) -> Self {
        self.write_timeout = write_timeout;
        self
    }

    /// Ask one question. Blank messages are rejected before any upstream call.
    pub async fn ask(&self, raw: &Value) -> AppResult<Recorded<ChatResult>> {
        let request = validate_chat_input(raw)?;
        let prompt = PromptFrame::wrap(&request.message, &request.lang)?;

        let raw_reply = self.completion.complete(&prompt).await.map_err(|e| {
            tracing::error!("Chat completion failed: {}", e);
            AppError::ServiceUnavailable(e.to_string())
        })?;
        let result = ChatResult::unwrap_reply(&raw_reply);

        let stored = match &self.sink {
            Some(sink) => {
                let record = ChatRecord::new(&request, &result);
                Some(bounded(self.write_timeout, sink.record_chat(&record)).await)
            }
            None => None,
        };

        Ok(Recorded::new(result, settle("chat", stored)))
    }
}
