//! Relay error model.

use thiserror::Error;

/// Result type used at the relay boundary.
pub type RelayResult<T> = Result<T, RelayError>;

/// Boundary-level error.
///
/// Every variant describes a malformed request that is rejected before the
/// command log is touched. The log itself has no failure modes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The submission carried no declared length.
    #[error("missing content length")]
    MissingLength,

    /// The declared length was not a non-negative integer.
    #[error("invalid content length: {0}")]
    InvalidLength(String),

    /// The submission is larger than the configured limit.
    #[error("payload of {declared} bytes exceeds maximum size of {limit} bytes")]
    PayloadTooLarge { declared: u64, limit: u64 },

    /// The submission did not parse as JSON.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A since marker was not a non-negative integer.
    #[error("invalid marker: {0}")]
    InvalidMarker(String),
}

impl RelayError {
    pub fn invalid_length(msg: impl Into<String>) -> Self {
        Self::InvalidLength(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    pub fn invalid_marker(msg: impl Into<String>) -> Self {
        Self::InvalidMarker(msg.into())
    }

    /// Returns true if the request itself was at fault (4xx).
    ///
    /// All current variants are; the relay has no server-side failure path.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::MissingLength
                | RelayError::InvalidLength(_)
                | RelayError::PayloadTooLarge { .. }
                | RelayError::MalformedPayload(_)
                | RelayError::InvalidMarker(_)
        )
    }
}
