//! HTTP routes.
//!
//! ```text
//! GET  /api/encroachments   list, filtered by tankName / year / month
//! POST /api/encroachments   create
//! GET  /api/health          store reachability and record count
//! *                         static browser pages
//! ```

pub mod encroachments;
pub mod health;

use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Routes under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/encroachments",
            get(encroachments::list).post(encroachments::create),
        )
        .route("/health", get(health::health))
}

/// The complete application: API, static pages, CORS, and request tracing.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .nest("/api", api_router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
