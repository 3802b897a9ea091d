//! Business logic services for the Crop Advisory service

pub mod chat;
pub mod persistence;
pub mod prediction;

pub use chat::ChatService;
pub use persistence::{PgRecordSink, RecordSink, SinkError, DEFAULT_WRITE_TIMEOUT};
pub use prediction::PredictionService;
