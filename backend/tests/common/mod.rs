//! In-memory fakes shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use crop_advisory::{
    external::{CompletionError, TextCompletion},
    services::{RecordSink, SinkError},
};
use shared::{ChatRecord, PredictionRecord, PromptFrame};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

// =============================================================================
// Fakes
// =============================================================================

#[derive(Default)]
pub struct ScriptedCompletion {
    reply: Option<String>,
    calls: AtomicUsize,
    pub prompts: Mutex<Vec<PromptFrame>>,
}

impl ScriptedCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, prompt: &PromptFrame) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply.clone().ok_or(CompletionError::Api {
            status: 500,
            body: "backend down".to_string(),
        })
    }
}

#[derive(Default)]
pub struct MemorySink {
    fail: bool,
    delay: Option<Duration>,
    pub predictions: Mutex<Vec<PredictionRecord>>,
    pub chats: Mutex<Vec<ChatRecord>>,
}

impl MemorySink {
    pub fn broken() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Accepts records, but only after `delay`
    pub fn stalled(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    async fn wait(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn record_prediction(&self, record: &PredictionRecord) -> Result<(), SinkError> {
        self.wait().await;
        if self.fail {
            return Err(SinkError::Database(sqlx::Error::PoolTimedOut));
        }
        self.predictions.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn record_chat(&self, record: &ChatRecord) -> Result<(), SinkError> {
        self.wait().await;
        if self.fail {
            return Err(SinkError::Database(sqlx::Error::PoolClosed));
        }
        self.chats.lock().unwrap().push(record.clone());
        Ok(())
    }
}
