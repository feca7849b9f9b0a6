//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and cookie handling.

pub mod config;
pub mod issue_token;
pub mod resolve_session;
pub mod verify_request;

pub use issue_token::{IssueTokenOutput, IssueTokenUseCase};
pub use resolve_session::{ResolveSessionUseCase, ResolvedSession};
pub use verify_request::VerifyRequestUseCase;
