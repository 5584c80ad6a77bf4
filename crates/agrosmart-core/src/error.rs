//! Error types for agrosmart-core.
//!
//! | Error | Caller should |
//! |-------|---------------|
//! | [`Error::NoSensorData`] | Submit or generate readings first |
//! | [`Error::InvalidInput`] | Fix the request; do not retry |
//! | [`Error::UpstreamUnavailable`] | Report to the client; the provider may recover |
//! | [`Error::InvalidConfig`] | Fix configuration and restart |

use agrosmart_types::ValidationError;

/// Result type for agrosmart-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing derived metrics or fetching weather.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The sensor store has never received a reading.
    #[error("No sensor data available")]
    NoSensorData,

    /// A request parameter failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// A weather provider call failed.
    #[error("Weather provider '{provider}' unavailable: {detail}")]
    UpstreamUnavailable {
        provider: &'static str,
        detail: String,
    },

    /// A provider could not be constructed from the given settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build an [`Error::UpstreamUnavailable`].
    pub fn upstream(provider: &'static str, detail: impl Into<String>) -> Self {
        Error::UpstreamUnavailable {
            provider,
            detail: detail.into(),
        }
    }
}
