use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use models::validation::ValidationErrors;
use service::errors::ServiceError;

/// JSON error reply: `{"message", "errors"?, "detail"?}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
    pub errors: Option<ValidationErrors>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), detail, errors: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, None)
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: errors.message(),
            detail: None,
            errors: Some(errors),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => Self::validation(errors),
            ServiceError::NotFound(message) => Self::not_found(message),
            ServiceError::Db(detail) => {
                error!(error = %detail, "database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(detail))
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: &self.message,
            errors: self.errors.as_ref(),
            detail: self.detail.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_has_only_message() {
        let resp = JsonApiError::from(ServiceError::not_found("Employee not found")).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, serde_json::json!({"message": "Employee not found"}));
    }

    #[tokio::test]
    async fn validation_lists_field_errors() {
        let mut errors = ValidationErrors::default();
        errors.add("name", "The name field is required.".into());
        errors.add("hour_cost", "The hour cost field must be at least 0.".into());
        let resp = JsonApiError::from(ServiceError::Validation(errors)).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "message": "The name field is required. (and 1 more error)",
                "errors": {
                    "name": ["The name field is required."],
                    "hour_cost": ["The hour cost field must be at least 0."]
                }
            })
        );
    }

    #[tokio::test]
    async fn db_failure_is_500_with_detail() {
        let resp = JsonApiError::from(ServiceError::Db("connection reset".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["detail"], "connection reset");
    }
}
