//! Heuristic yield estimator
//!
//! This is a bounded heuristic, not a crop model: the yield is the area scaled
//! by a multiplier drawn uniformly from [`MIN_MULTIPLIER`, `MAX_MULTIPLIER`].

use rand::Rng;
use std::sync::Arc;

use crate::models::YieldCategory;
use crate::types::round_to_cents;

pub const MIN_MULTIPLIER: f64 = 1.5;
pub const MAX_MULTIPLIER: f64 = 3.5;

/// Smallest area fed into the estimate, so a tiny field never yields exactly zero
pub const MIN_ESTIMATE_AREA: f64 = 0.01;

/// Source of uniformly distributed reals
pub trait RandomSource: Send + Sync {
    /// Draw a value in `[low, high]`
    fn uniform(&self, low: f64, high: f64) -> f64;
}

/// Thread-local generator from `rand`; each call samples independently
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Always returns the same value, clamped into the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        self.0.clamp(low, high)
    }
}

#[derive(Clone)]
pub struct YieldEstimator {
    random: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for YieldEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YieldEstimator").finish_non_exhaustive()
    }
}

impl Default for YieldEstimator {
    fn default() -> Self {
        Self::new(ThreadRandom)
    }
}

impl YieldEstimator {
    pub fn new(random: impl RandomSource + 'static) -> Self {
        Self {
            random: Arc::new(random),
        }
    }

    /// Estimate yield for a field of `area` hectares
    pub fn estimate(&self, area: f64) -> (f64, YieldCategory) {
        let multiplier = self.random.uniform(MIN_MULTIPLIER, MAX_MULTIPLIER);
        let yield_value = round_to_cents(multiplier * area.max(MIN_ESTIMATE_AREA));
        (yield_value, YieldCategory::from_yield(yield_value))
    }
}
