//! Built-in routes.
//!
//! Besides the health probe these exist to drive each branch of the error
//! pipeline from outside (smoke checks, integration tests).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::failure::DispatchFailure;

#[derive(Debug, Error)]
#[error("storage unavailable")]
pub struct StorageUnavailable;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe handler failed")]
    Failed(#[source] StorageUnavailable),
}

pub async fn healthz() -> &'static str {
    "ok"
}

/// Unhandled exception: reported, rendered as the generic error page.
pub async fn boom() -> Result<&'static str, DispatchFailure> {
    Err(DispatchFailure::exception(&ProbeError::Failed(StorageUnavailable)))
}

/// Exception after the handler already chose 403: the status is kept.
pub async fn forbidden() -> Result<&'static str, DispatchFailure> {
    Err(DispatchFailure::exception(&ProbeError::Failed(StorageUnavailable))
        .with_status(StatusCode::FORBIDDEN))
}

/// Error without an exception attached: not reported.
pub async fn unauthorized() -> Result<&'static str, DispatchFailure> {
    Err(DispatchFailure::from_code("error-route-unauthorized").with_status(StatusCode::UNAUTHORIZED))
}

/// API-style failure with its own body: left untouched.
pub async fn api_boom() -> Response {
    let err = ProbeError::Failed(StorageUnavailable);
    let body = Json(json!({ "error": err.to_string() }));
    DispatchFailure::exception(&err)
        .attach_to((StatusCode::SERVICE_UNAVAILABLE, body).into_response())
}

pub async fn not_found() -> DispatchFailure {
    DispatchFailure::router_no_match()
}
