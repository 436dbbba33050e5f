//! Centralized error types for Ground Control.

use thiserror::Error;

/// Message returned when a survey id is unknown to BSD.
pub const SURVEY_NOT_IN_BSD: &str = "Provided Survey ID does not exist in BSD.";

/// Main error type for graph operations.
///
/// Missing records are not errors: lookups return `Option`.
#[derive(Error, Debug)]
pub enum GcError {
    #[error("Malformed global id: {0}")]
    MalformedId(String),

    /// A caller mistake surfaced verbatim to the client.
    #[error("{message}")]
    InvalidInput { status: u16, message: String },

    #[error(transparent)]
    Remote(#[from] gc_bsd::BsdError),

    #[error("Database error: {0}")]
    Database(#[from] gc_db::DbError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for graph operations.
pub type GcResult<T> = Result<T, GcError>;

impl GcError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a user-facing bad request error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            status: 400,
            message: msg.into(),
        }
    }
}
