//! Error types for tankwatch-api, and their HTTP rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tankwatch_core::FieldError;
use thiserror::Error;

/// Result type alias for tankwatch-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the server
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from tankwatch-core or a store backend
    #[error(transparent)]
    Core(#[from] tankwatch_core::Error),

    /// Socket or filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Message returned when listing fails on the server side.
pub const FETCH_FAILED: &str = "Server error while fetching reports";
/// Message returned when a list query is malformed.
pub const INVALID_QUERY: &str = "Invalid query parameters";
/// Message returned when a create fails for any reason.
pub const SAVE_FAILED: &str = "Error saving to database";

/// JSON error body: `{ "msg": ..., "error"?: ..., "fields"?: [...] }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Stable, human-readable summary.
    pub msg: &'static str,
    /// Detail about the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-field validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// A handler failure, tagged with the operation it interrupted.
#[derive(Debug)]
pub enum ApiError {
    /// Listing records failed.
    Fetch(tankwatch_core::Error),
    /// Creating a record failed.
    Save(tankwatch_core::Error),
    /// The create body was not usable JSON.
    MalformedBody(String),
}

impl ApiError {
    /// Status code and body for this failure.
    pub fn parts(&self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::Fetch(err) if err.is_client_error() => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    msg: INVALID_QUERY,
                    error: Some(err.to_string()),
                    fields: Vec::new(),
                },
            ),
            ApiError::Fetch(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    msg: FETCH_FAILED,
                    error: None,
                    fields: Vec::new(),
                },
            ),
            ApiError::Save(err) => {
                let status = if err.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (
                    status,
                    ErrorBody {
                        msg: SAVE_FAILED,
                        error: Some(err.to_string()),
                        fields: err.field_errors().to_vec(),
                    },
                )
            }
            ApiError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    msg: SAVE_FAILED,
                    error: Some(detail.clone()),
                    fields: Vec::new(),
                },
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        if status.is_server_error() {
            match &self {
                ApiError::Fetch(err) => tracing::error!("Error fetching items: {err}"),
                ApiError::Save(err) => tracing::error!("Error saving item: {err}"),
                ApiError::MalformedBody(_) => {}
            }
        } else {
            tracing::warn!(
                status = status.as_u16(),
                detail = body.error.as_deref().unwrap_or_default(),
                "Rejected request"
            );
        }
        (status, Json(body)).into_response()
    }
}
