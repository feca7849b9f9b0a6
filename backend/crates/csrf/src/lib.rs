//! CSRF (Cross-Site Request Forgery) Protection Module
//!
//! Clean Architecture structure:
//! - `domain/` - Token derivation, request classification
//! - `application/` - Use cases (resolve session, issue token, verify request)
//! - `presentation/` - Token endpoint, middleware, router
//!
//! ## Security Model
//! - Double-submit: the token is readable by trusted script (body and cookie)
//!   and must be echoed in the `x-csrf-token` header
//! - Tokens are HMAC-bound to an HttpOnly session identifier cookie, so a token
//!   minted for one session never verifies for another
//! - Stateless: no server-side token table, validation is a pure function
//! - `GET`, `HEAD`, `OPTIONS` and `TRACE` are never validated

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{ConfigError, CsrfConfig, Environment};
pub use domain::value_objects::{CsrfToken, SessionId};
pub use error::{CsrfError, CsrfResult};
pub use presentation::middleware::{CSRF_HEADER, CSRF_HEADER_ALIASES, require_csrf_token};
pub use presentation::router::with_csrf_protection;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
