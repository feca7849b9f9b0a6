//! CSRF Router

use axum::{Router, middleware, routing::get};

use crate::application::config::CsrfConfig;
use crate::presentation::handlers::{self, CsrfState};
use crate::presentation::middleware::require_csrf_token;

/// Mount the token endpoint on `app` and guard every route with the middleware
pub fn with_csrf_protection(app: Router, config: CsrfConfig) -> Router {
    let state = CsrfState::new(config);

    app.merge(token_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, require_csrf_token))
}

fn token_routes(state: CsrfState) -> Router {
    let path = state.config.token_path.clone();
    Router::new()
        .route(&path, get(handlers::issue_token))
        .with_state(state)
}
