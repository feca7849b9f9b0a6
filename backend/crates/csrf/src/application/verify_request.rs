//! Verify Request Use Case

use std::sync::Arc;

use crate::application::config::CsrfConfig;
use crate::domain::entities::{ProtectedRequest, requires_validation};
use crate::domain::services::verify_token;
use crate::error::{CsrfError, CsrfResult};

pub struct VerifyRequestUseCase {
    config: Arc<CsrfConfig>,
}

impl VerifyRequestUseCase {
    pub fn new(config: Arc<CsrfConfig>) -> Self {
        Self { config }
    }

    /// Accept the request or explain why it is rejected
    pub fn execute(&self, request: &ProtectedRequest) -> CsrfResult<()> {
        if !requires_validation(&request.method) {
            return Ok(());
        }

        let token = request
            .presented_token
            .as_ref()
            .ok_or(CsrfError::MissingToken)?;

        verify_token(token, &request.session_id, &self.config.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::generate_token;
    use crate::domain::value_objects::SessionId;
    use http::Method;

    fn use_case() -> (VerifyRequestUseCase, Arc<CsrfConfig>) {
        let config = Arc::new(CsrfConfig::development());
        (VerifyRequestUseCase::new(config.clone()), config)
    }

    #[test]
    fn test_valid_token_accepted() {
        let (use_case, config) = use_case();
        let session = SessionId::new();
        let token = generate_token(&session, &config.secret).unwrap();

        let request = ProtectedRequest::new(Method::POST, Some(token), session);
        assert!(use_case.execute(&request).is_ok());
    }

    #[test]
    fn test_missing_token_rejected() {
        let (use_case, _) = use_case();
        let request = ProtectedRequest::new(Method::DELETE, None, SessionId::new());
        assert!(matches!(
            use_case.execute(&request),
            Err(CsrfError::MissingToken)
        ));
    }

    #[test]
    fn test_foreign_session_token_rejected() {
        let (use_case, config) = use_case();
        let token = generate_token(&SessionId::new(), &config.secret).unwrap();

        let request = ProtectedRequest::new(Method::PUT, Some(token), SessionId::new());
        assert!(matches!(
            use_case.execute(&request),
            Err(CsrfError::InvalidToken)
        ));
    }

    #[test]
    fn test_safe_method_needs_no_token() {
        let (use_case, _) = use_case();
        let request = ProtectedRequest::new(Method::GET, None, SessionId::new());
        assert!(use_case.execute(&request).is_ok());
    }
}
