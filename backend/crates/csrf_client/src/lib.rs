//! CSRF Client
//!
//! HTTP client wrapper that makes the CSRF protocol transparent to callers:
//! - Mutating requests (`POST`, `PUT`, `PATCH`, `DELETE`) get the cached token
//!   attached as `x-csrf-token`, fetching one first when the cache is empty
//! - A `403` triggers one token refresh and one replay; a second `403` is final
//! - Cookies (the session identifier) are carried on every request

pub mod cache;
pub mod client;
pub mod error;

pub use cache::TokenCache;
pub use client::{CSRF_HEADER, CsrfClient, DEFAULT_TOKEN_PATH};
pub use error::{ClientError, ClientResult};

#[cfg(test)]
mod tests;
