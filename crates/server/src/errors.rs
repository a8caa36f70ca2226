use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

use crate::metrics::{OPTIMISTIC_LOCK_CONFLICTS_TOTAL, UNEXPECTED_ERRORS_TOTAL};
use crate::validation::FieldErrors;

/// Error returned by handlers; renders the JSON error bodies of the API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("optimistic lock conflict: {0}")]
    Conflict(String),
    /// Full detail is always logged; it reaches the client only when `expose` is set.
    #[error("unexpected error: {detail}")]
    Unexpected { detail: String, expose: bool },
}

impl ApiError {
    pub fn from_service(err: ServiceError, expose: bool) -> Self {
        match err {
            ServiceError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ServiceError::OptimisticLockConflict { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Unexpected { detail: format!("[{}] {}", other.code(), other), expose },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errs) => ErrorBody {
                message: "Validation failed",
                status: status.as_u16(),
                errors: Some(errs),
                error: None,
            },
            ApiError::NotFound(msg) => ErrorBody { message: msg, status: status.as_u16(), errors: None, error: None },
            ApiError::Conflict(detail) => {
                OPTIMISTIC_LOCK_CONFLICTS_TOTAL.inc();
                warn!(detail = %detail, "update_conflict");
                ErrorBody {
                    message: "Resource modified by another user",
                    status: status.as_u16(),
                    errors: None,
                    error: None,
                }
            }
            ApiError::Unexpected { detail, expose } => {
                UNEXPECTED_ERRORS_TOTAL.inc();
                error!(error = %detail, "unhandled error");
                ErrorBody {
                    message: "An unexpected error occurred",
                    status: status.as_u16(),
                    errors: None,
                    error: expose.then_some(detail.as_str()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use service::errors::EntityKind;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_carries_entity_and_id() {
        let err = ApiError::from_service(ServiceError::not_found(EntityKind::Company, 7), false);
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"message": "Company not found with id: 7", "status": 404}));
    }

    #[tokio::test]
    async fn conflict_is_generic() {
        let err = ApiError::from_service(ServiceError::OptimisticLockConflict { kind: EntityKind::Job, id: 3 }, true);
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, serde_json::json!({"message": "Resource modified by another user", "status": 409}));
    }

    #[tokio::test]
    async fn validation_lists_field_errors() {
        let (status, body) = body_json(ApiError::Validation(FieldErrors::single("name", "bad"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["name"][0], "bad");
    }

    #[tokio::test]
    async fn unexpected_detail_follows_toggle() {
        let hidden = ApiError::from_service(ServiceError::Repository("connection refused".into()), false);
        let (status, body) = body_json(hidden).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"message": "An unexpected error occurred", "status": 500}));

        let shown = ApiError::from_service(ServiceError::Repository("connection refused".into()), true);
        let (_, body) = body_json(shown).await;
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }
}
