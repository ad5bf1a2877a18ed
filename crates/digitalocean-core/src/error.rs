//! Error types for DigitalOcean operations.
//!
//! Every failure is reported to the immediate caller. Nothing in this crate
//! retries or recovers internally.

use thiserror::Error;

/// Main error type for DigitalOcean operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No usable HTTP stack could be constructed
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The request could not be sent or completed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body was not valid JSON
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// The response was valid JSON but not shaped as expected
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Specialized result type for DigitalOcean operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TransportUnavailable(_) => "TRANSPORT_UNAVAILABLE",
            Self::ConnectionFailed(_) => "CONNECTION_FAILED",
            Self::DecodeError(_) => "DECODE_ERROR",
            Self::UnexpectedResponse(_) => "UNEXPECTED_RESPONSE",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ConnectionFailed(format!("request timed out: {err}"))
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::ConfigError(format!("invalid URL: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
