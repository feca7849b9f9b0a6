//! Domain Layer - Token derivation and request classification
//!
//! This layer contains:
//! - Domain value objects (SessionId, CsrfToken)
//! - Domain entities (ProtectedRequest)
//! - Domain services (token generation and verification)
//!
//! Nothing here is persisted: token validity is a pure function of
//! (session identifier, presented token, secret).

pub mod entities;
pub mod services;
pub mod value_objects;
