//! CSRF Middleware
//!
//! Gates state-changing methods behind token validation.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::{ResolveSessionUseCase, VerifyRequestUseCase};
use crate::domain::entities::{ProtectedRequest, requires_validation};
use crate::domain::value_objects::CsrfToken;
use crate::error::CsrfError;
use crate::presentation::handlers::CsrfState;

/// Canonical request header carrying the token
pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrf-token");

/// Accepted token headers, in lookup order. Header names are case-insensitive.
pub const CSRF_HEADER_ALIASES: [&str; 2] = ["x-csrf-token", "csrf-token"];

/// Presented token from the first non-blank accepted header
pub fn extract_presented_token(headers: &HeaderMap) -> Option<CsrfToken> {
    CSRF_HEADER_ALIASES.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .and_then(CsrfToken::parse)
    })
}

/// Middleware that requires a valid CSRF token on state-changing requests
pub async fn require_csrf_token(
    State(state): State<CsrfState>,
    req: Request,
    next: Next,
) -> Response {
    if !requires_validation(req.method()) {
        return next.run(req).await;
    }

    let resolved = ResolveSessionUseCase::new(state.config.clone()).execute(req.headers());

    let session_cookie = match resolved.cookie.as_ref().map(|c| c.to_header_value()).transpose() {
        Ok(cookie) => cookie,
        Err(e) => {
            return CsrfError::TokenGeneration(format!("invalid Set-Cookie value: {e}"))
                .into_response();
        }
    };

    let record = ProtectedRequest::new(
        req.method().clone(),
        extract_presented_token(req.headers()),
        resolved.session_id,
    );

    let mut response = match VerifyRequestUseCase::new(state.config.clone()).execute(&record) {
        Ok(()) => next.run(req).await,
        Err(e) => {
            tracing::debug!(
                method = %record.method,
                session_id = %record.session_id,
                new_session = session_cookie.is_some(),
                "Rejected protected request"
            );
            e.into_response()
        }
    };

    if let Some(cookie) = session_cookie {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    response
}
