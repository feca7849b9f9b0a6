//! CSRF Error Types
//!
//! This module provides CSRF-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// CSRF-specific result type alias
pub type CsrfResult<T> = Result<T, CsrfError>;

/// Message returned for every rejected request. Never names the expected token.
pub const REJECTED_MESSAGE: &str = "Invalid CSRF token";

/// Message returned when the token endpoint cannot mint a token
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate CSRF token";

#[derive(Debug, Error)]
pub enum CsrfError {
    /// No token header on a state-changing request
    #[error("CSRF token missing")]
    MissingToken,

    /// Presented token does not verify against the session identifier
    #[error("CSRF token invalid")]
    InvalidToken,

    /// Internal failure while deriving a token
    #[error("CSRF token generation failed: {0}")]
    TokenGeneration(String),
}

impl CsrfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CsrfError::MissingToken | CsrfError::InvalidToken => ErrorKind::Forbidden,
            CsrfError::TokenGeneration(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError with a client-safe message
    pub fn to_app_error(&self) -> AppError {
        match self {
            CsrfError::MissingToken | CsrfError::InvalidToken => {
                AppError::new(self.kind(), REJECTED_MESSAGE)
                    .with_action("Fetch a new CSRF token and retry the request")
            }
            CsrfError::TokenGeneration(_) => AppError::new(self.kind(), GENERATION_FAILED_MESSAGE),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CsrfError::TokenGeneration(msg) => {
                tracing::error!(message = %msg, "CSRF token generation failed");
            }
            CsrfError::InvalidToken => {
                tracing::warn!("CSRF token rejected");
            }
            CsrfError::MissingToken => {
                tracing::debug!("CSRF token missing on protected request");
            }
        }
    }
}

impl From<CsrfError> for AppError {
    fn from(err: CsrfError) -> Self {
        err.to_app_error()
    }
}

impl From<platform::crypto::CryptoError> for CsrfError {
    fn from(err: platform::crypto::CryptoError) -> Self {
        CsrfError::TokenGeneration(err.to_string())
    }
}

impl IntoResponse for CsrfError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
