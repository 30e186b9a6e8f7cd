//! Error types for slo-engine input boundaries.
//!
//! The planning computations themselves never fail; these errors only come
//! from turning raw user or file input into engine types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
