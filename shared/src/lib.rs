//! Shared types and advisory logic for the Crop Advisory service
//!
//! This crate holds the pure advisory computation (validation, yield
//! estimation, recommendations, chat framing) so it can be exercised without
//! the HTTP server or any external collaborator.

pub mod estimator;
pub mod models;
pub mod types;
pub mod validation;

pub use estimator::*;
pub use models::*;
pub use types::*;
pub use validation::*;
