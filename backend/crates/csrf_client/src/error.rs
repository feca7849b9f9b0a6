//! Client Error Types

use reqwest::StatusCode;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or response decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The token endpoint did not answer with a token
    #[error("CSRF token fetch failed with status {status}")]
    TokenFetch { status: StatusCode },

    /// Server returned a token that cannot be sent as a header value
    #[error("CSRF token is not a valid header value")]
    InvalidToken,

    /// Still forbidden after one refresh-and-replay
    #[error("request failed, please retry")]
    Rejected { status: StatusCode },

    /// Request body cannot be replayed after a rejection
    #[error("request was rejected and its body cannot be replayed")]
    NotReplayable,
}

impl ClientError {
    /// Whether the caller should treat this as the final CSRF rejection
    pub fn is_rejected(&self) -> bool {
        matches!(self, ClientError::Rejected { .. } | ClientError::NotReplayable)
    }
}
