//! Remote directory errors.

use thiserror::Error;

/// HTTP status BSD answers with when a referenced record does not exist.
pub const STATUS_CONFLICT: u16 = 409;

#[derive(Error, Debug)]
pub enum BsdError {
    #[error("BSD request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("BSD API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse BSD response: {0}")]
    Parse(String),

    #[error("BSD configuration error: {0}")]
    Config(String),
}

pub type BsdResult<T> = Result<T, BsdError>;

impl BsdError {
    /// The HTTP-like status code of the failure, when the API produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether BSD reported the referenced record as missing.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(STATUS_CONFLICT)
    }
}
