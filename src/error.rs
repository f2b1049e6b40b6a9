//! Error types for the wellbeing signal engine

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::CompanyId;

/// Errors that can occur while computing a wellbeing score.
///
/// Arithmetic edge cases (empty cohorts, zero totals, empty phrase sets) are
/// handled inside the engine and never surface here. Only invalid input and
/// collaborator failures do.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid window: end {end} is not after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Unknown cohort scope: {0}")]
    UnknownScope(CompanyId),

    #[error("Store unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// True for errors raised before any aggregation query ran
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidWindow { .. } | EngineError::UnknownScope(_)
        )
    }
}

/// Failures reported by an event store, user directory, or journal source
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),

    #[error("query on {collection} failed: {message}")]
    Query { collection: String, message: String },
}
