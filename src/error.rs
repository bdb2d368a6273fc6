use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use crate::models::FieldError;

/// Failures raised by the client service
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("client with id {0} not found")]
    NotFound(i64),

    #[error("a client with cpf {0} is already registered")]
    DuplicateCpf(String),

    #[error("failed to store client photo: {0}")]
    FileStorage(#[source] std::io::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::DuplicateCpf(_) => StatusCode::CONFLICT,
            ServiceError::FileStorage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Storage(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Body returned on every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    pub path: String,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>, path: &str) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            path: path.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn from_service(err: ServiceError, path: &str) -> Self {
        Self::new(err.status_code(), err.to_string(), path)
    }

    /// 422 with one `field: reason` pair per offending field.
    pub fn validation(errors: &[FieldError], path: &str) -> Self {
        let detail = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.reason))
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("validation failed: {detail}"),
            path,
        )
    }

    pub fn bad_request(message: impl Into<String>, path: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, path)
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServiceError::NotFound(1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::DuplicateCpf("12345678901".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::FileStorage(std::io::Error::other("disk full")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::Storage(anyhow::anyhow!("boom")).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn validation_body_lists_fields() {
        let errors = vec![
            FieldError {
                field: "cpf",
                reason: "cpf must be 11 digits",
            },
            FieldError {
                field: "name",
                reason: "name is required",
            },
        ];
        let body = ErrorBody::validation(&errors, "/api/clients");
        assert_eq!(body.status, 422);
        assert_eq!(body.path, "/api/clients");
        assert!(body.message.contains("cpf: cpf must be 11 digits"));
        assert!(body.message.contains("name: name is required"));
    }
}
