//! Error types for the codec.

use thiserror::Error;

/// The failures the codec surfaces to its caller.
///
/// Everything else (unknown charsets, odd envelopes, missing ids, broken
/// tokens) is absorbed by a fallback and never becomes an error.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The decoded body is not JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream request failed with status {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Best available message from the response body.
        message: String,
    },
}

impl CodecError {
    /// Returns the upstream status code, if this error came from one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::InvalidJson(_) => None,
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
