//! Error conversions and HTTP rendering of [`AppError`]

use super::app_error::AppError;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request("Request body is not valid JSON").with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
            .with_action("Send a JSON body with Content-Type: application/json")
    }
}

/// JSON body rendered for every [`AppError`]
#[cfg(feature = "axum")]
pub fn error_body(err: &AppError) -> serde_json::Value {
    serde_json::json!({
        "status": err.status_code(),
        "title": err.kind().title(),
        "message": err.message(),
        "action": err.action(),
    })
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(error_body(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_json_error_is_bad_request() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
        assert_eq!(app_err.message(), "Request body is not valid JSON");
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_error_body_shape() {
        let err = AppError::new(ErrorKind::Forbidden, "Invalid CSRF token");
        let body = error_body(&err);
        assert_eq!(body["status"], 403);
        assert_eq!(body["title"], "Forbidden");
        assert_eq!(body["message"], "Invalid CSRF token");
        assert!(body["action"].is_null());
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AppError::internal("Failed to generate CSRF token").into_response();
        assert_eq!(response.status().as_u16(), 500);
    }
}
