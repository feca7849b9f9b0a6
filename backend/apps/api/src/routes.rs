//! Application Routes
//!
//! Sample endpoints behind CSRF protection.

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct EchoRequest {
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub message: String,
    pub data: Option<Value>,
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// POST /api/echo
async fn echo(payload: Result<Json<EchoRequest>, JsonRejection>) -> AppResult<Json<EchoResponse>> {
    let Json(req) = payload?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::bad_request("message must not be empty")
            .with_action("Send a non-empty message"));
    }

    tracing::info!(len = message.len(), "Echo request accepted");

    Ok(Json(EchoResponse {
        message: message.to_string(),
        data: req.data,
    }))
}

pub fn api_router() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/echo", post(echo))
}
