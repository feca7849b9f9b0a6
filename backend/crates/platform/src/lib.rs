//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (OS randomness, HMAC-SHA256, Base64url, secret keys)
//! - Cookie management (Set-Cookie rendering, Cookie header parsing)

pub mod cookie;
pub mod crypto;
