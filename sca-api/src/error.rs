/// Error types for the analysis service client.
use thiserror::Error;

/// Fallback shown when a failing response carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "The analysis service could not complete the request";

/// Main error type for analysis service operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP transport failed (connect, timeout, body read).
    #[error("analysis request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("analysis service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx but the body did not match the contract.
    #[error("failed to decode analysis response: {0}")]
    Decode(String),

    /// The request was aborted through its cancellation token.
    #[error("analysis request cancelled")]
    Cancelled,
}

impl ApiError {
    /// A human-readable message suitable for direct display. Service-provided
    /// messages pass through; transport and decode failures collapse to the
    /// generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Service { message, .. } => message.clone(),
            ApiError::Cancelled => "The analysis request was cancelled".to_string(),
            ApiError::Http(_) | ApiError::Decode(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Type alias for Results using ApiError.
pub type Result<T> = std::result::Result<T, ApiError>;
