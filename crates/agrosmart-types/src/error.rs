//! Error types for agrosmart-types.

use thiserror::Error;

/// Errors that can occur when parsing AgroSmart data.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The timestamp is neither RFC 3339 nor an ISO 8601 local date-time.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The calendar date is not in `YYYY-MM-DD` form.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type alias using agrosmart-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// A single validation failure with context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The field path (e.g., `zone_id` or `server.bind`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
