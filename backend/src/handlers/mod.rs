//! HTTP handlers for the Crop Advisory API

pub mod chat;
pub mod health;
pub mod prediction;

pub use chat::chat_support;
pub use health::health_check;
pub use prediction::predict;

use axum::body::Bytes;
use serde_json::Value;

/// Parse a request body as JSON regardless of its content type.
/// An empty body is treated as an empty object.
pub(crate) fn parse_body(body: &Bytes) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).ok()
}
