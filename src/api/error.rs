//! Errors raised by finance service calls.

use crate::api::http::HttpError;
use thiserror::Error;

/// Failure of a single finance service call.
///
/// The fraud and savings screens collapse every variant into one
/// user-facing message; the variant only reaches the log.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete.
    #[error("network failure: {0}")]
    Network(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response payload: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request body could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// Short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Status { .. } => "status",
            ApiError::Parse(_) => "parse",
            ApiError::Encode(_) => "encode",
        }
    }
}
