//! Scorer service error types.

use thiserror::Error;

/// Errors that can occur when calling the external scorer service.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// The API returned a 429 rate limit response. Classified for the
    /// notice; windcheck never retries.
    #[error("rate limited by the scorer service")]
    RateLimited,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body could not be decoded as a chat completion.
    #[error("malformed response body: {0}")]
    MalformedResponse(String),
}
