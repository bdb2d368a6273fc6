//! HTTP route handlers.
//!
//! - `clients`: the client registry CRUD endpoints
//! - `health`: liveness check

pub mod clients;
pub mod health;

use axum::http::{StatusCode, Uri};

use crate::error::ErrorBody;

/// Fallback for undefined routes.
pub async fn not_found(uri: Uri) -> ErrorBody {
    ErrorBody::new(StatusCode::NOT_FOUND, "no such route", uri.path())
}
