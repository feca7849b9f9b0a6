//! API DTOs (Data Transfer Objects)

use serde::Serialize;

/// Response for GET /csrf-token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}
