//! Provider error types.
//!
//! None of these are retried. They propagate to the caller as fatal.

use thiserror::Error;

/// Errors that can occur when calling a generation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API rejected the credential.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned a 429 quota or rate limit response.
    #[error("quota or rate limit exceeded: {0}")]
    RateLimited(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response contained no text to parse.
    #[error("model returned no text (finish reason: {0})")]
    EmptyResponse(String),
}
