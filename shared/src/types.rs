//! Common types used across the service

use serde::{Deserialize, Serialize};

/// User id recorded when the caller does not identify itself
pub const ANONYMOUS_USER: &str = "guest";

/// Language used for chat replies when the caller does not pick one
pub const DEFAULT_LANGUAGE: &str = "English";

/// Above this magnitude an f64 has no fractional digits left to round
const MAX_FRACTIONAL_MAGNITUDE: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round to two decimal places, ties to even.
/// Values too large to carry cents are returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() || scaled.abs() >= MAX_FRACTIONAL_MAGNITUDE {
        return value;
    }
    scaled.round_ties_even() / 100.0
}

/// Round to the nearest whole number, ties to even
pub fn round_whole(value: f64) -> f64 {
    value.round_ties_even()
}

/// Outcome of the best-effort persistence step that follows a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistenceOutcome {
    /// The record was written
    Stored,
    /// No sink is configured
    Skipped,
    /// The sink rejected the record; the request itself still succeeded
    Failed { reason: String },
}

impl PersistenceOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, PersistenceOutcome::Stored)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PersistenceOutcome::Failed { .. })
    }
}

/// A primary result paired with what happened when it was persisted
#[derive(Debug, Clone)]
pub struct Recorded<T> {
    pub value: T,
    pub persistence: PersistenceOutcome,
}

impl<T> Recorded<T> {
    pub fn new(value: T, persistence: PersistenceOutcome) -> Self {
        Self { value, persistence }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
