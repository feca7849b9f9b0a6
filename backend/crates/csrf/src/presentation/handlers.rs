//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::IntoResponse;

use crate::application::IssueTokenUseCase;
use crate::application::config::CsrfConfig;
use crate::error::{CsrfError, CsrfResult};
use crate::presentation::dto::CsrfTokenResponse;

/// Shared state for the token endpoint and the protection middleware
#[derive(Debug, Clone)]
pub struct CsrfState {
    pub config: Arc<CsrfConfig>,
}

impl CsrfState {
    pub fn new(config: CsrfConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// GET /csrf-token
pub async fn issue_token(
    State(state): State<CsrfState>,
    headers: HeaderMap,
) -> CsrfResult<impl IntoResponse> {
    let output = IssueTokenUseCase::new(state.config.clone()).execute(&headers)?;

    let mut response_headers = HeaderMap::new();
    for cookie in &output.cookies {
        let value = cookie
            .to_header_value()
            .map_err(|e| CsrfError::TokenGeneration(format!("invalid Set-Cookie value: {e}")))?;
        response_headers.append(header::SET_COOKIE, value);
    }
    response_headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Ok((
        response_headers,
        Json(CsrfTokenResponse {
            csrf_token: output.token.into_string(),
        }),
    ))
}
