//! `/api/health`: store reachability.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

/// Health check payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    /// `ok` or `unavailable`.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Stored record count, when the store answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let probe = match state.store.ping().await {
        Ok(()) => state.store.count().await,
        Err(err) => Err(err),
    };

    match probe {
        Ok(records) => (StatusCode::OK, Json(response("ok", Some(records)))),
        Err(err) => {
            tracing::error!(backend = state.store.backend(), "Health check failed: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(response("unavailable", None)),
            )
        }
    }
}

fn response(status: &'static str, records: Option<usize>) -> HealthResponse {
    HealthResponse {
        status,
        service: "tankwatch",
        version: env!("CARGO_PKG_VERSION"),
        records,
    }
}
