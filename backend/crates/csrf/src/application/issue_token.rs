//! Issue Token Use Case

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::SetCookie;

use crate::application::config::CsrfConfig;
use crate::application::resolve_session::ResolveSessionUseCase;
use crate::domain::services::generate_token;
use crate::domain::value_objects::{CsrfToken, SessionId};
use crate::error::CsrfResult;

/// Output DTO for issue token
#[derive(Debug, Clone)]
pub struct IssueTokenOutput {
    pub session_id: SessionId,
    pub token: CsrfToken,
    /// Cookies to write, session cookie first when it was minted
    pub cookies: Vec<SetCookie>,
}

pub struct IssueTokenUseCase {
    config: Arc<CsrfConfig>,
}

impl IssueTokenUseCase {
    pub fn new(config: Arc<CsrfConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, headers: &HeaderMap) -> CsrfResult<IssueTokenOutput> {
        let resolved = ResolveSessionUseCase::new(self.config.clone()).execute(headers);

        let token = generate_token(&resolved.session_id, &self.config.secret)?;

        let mut cookies = Vec::with_capacity(2);
        if let Some(session_cookie) = resolved.cookie {
            cookies.push(session_cookie);
        }
        cookies.push(self.config.token_cookie.build_set_cookie(token.as_str()));

        tracing::debug!(session_id = %resolved.session_id, "Issued CSRF token");

        Ok(IssueTokenOutput {
            session_id: resolved.session_id,
            token,
            cookies,
        })
    }
}
