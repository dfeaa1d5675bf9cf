//! Chat service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatServiceError {
    /// The upstream provider refused the request because of rate limits.
    /// Surfaced to the client as-is so it can back off.
    #[error("assistant is rate limited, try again later")]
    RateLimited,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from assistant provider: {0}")]
    UnexpectedResponse(String),
}
