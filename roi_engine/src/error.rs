//! Error types for the ROI engine.
//!
//! The computation itself never fails.  Errors only arise at the
//! edges: looking up a tier that is not in the catalog, rejecting
//! user input before it reaches the engine, and loading
//! configuration from disk.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoiError>;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Tier not found: {id}")]
    TierNotFound { id: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoiError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RoiError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
