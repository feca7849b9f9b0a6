//! Domain Entities

use http::Method;

use crate::domain::value_objects::{CsrfToken, SessionId};

/// Methods that never change state and bypass validation unconditionally
pub const SAFE_METHODS: [Method; 4] = [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE];

/// Whether a request with `method` must carry a valid token
pub fn requires_validation(method: &Method) -> bool {
    !SAFE_METHODS.contains(method)
}

/// A state-changing request under validation. Built per request, never stored.
#[derive(Debug, Clone)]
pub struct ProtectedRequest {
    pub method: Method,
    pub presented_token: Option<CsrfToken>,
    pub session_id: SessionId,
}

impl ProtectedRequest {
    pub fn new(method: Method, presented_token: Option<CsrfToken>, session_id: SessionId) -> Self {
        Self {
            method,
            presented_token,
            session_id,
        }
    }
}
