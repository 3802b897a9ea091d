//! Domain models for the Crop Advisory service

mod advisory;
mod chat;
mod prediction;

pub use advisory::*;
pub use chat::*;
pub use prediction::*;
