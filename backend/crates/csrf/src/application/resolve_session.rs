//! Resolve Session Use Case
//!
//! Finds the caller's session identifier or mints one. Minting does not
//! touch the response: the cookie to write is handed back to the caller.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::{SetCookie, extract_cookie};

use crate::application::config::CsrfConfig;
use crate::domain::value_objects::SessionId;

/// Result of session resolution
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub session_id: SessionId,
    /// `Some` only when the identifier was minted by this call
    pub cookie: Option<SetCookie>,
}

impl ResolvedSession {
    pub fn is_new(&self) -> bool {
        self.cookie.is_some()
    }
}

pub struct ResolveSessionUseCase {
    config: Arc<CsrfConfig>,
}

impl ResolveSessionUseCase {
    pub fn new(config: Arc<CsrfConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, headers: &HeaderMap) -> ResolvedSession {
        let existing = extract_cookie(headers, &self.config.session_cookie.name)
            .and_then(|value| value.parse::<SessionId>().ok());

        if let Some(session_id) = existing {
            return ResolvedSession {
                session_id,
                cookie: None,
            };
        }

        let session_id = SessionId::new();
        let cookie = self
            .config
            .session_cookie
            .build_set_cookie(&session_id.to_string());

        tracing::debug!(session_id = %session_id, "Minted CSRF session");

        ResolvedSession {
            session_id,
            cookie: Some(cookie),
        }
    }
}
