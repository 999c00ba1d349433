//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`     - Health check (DB)
//! - `/api/*`           - REST API
//! - `GET  /{code}`     - Short link redirect
//!
//! Static segments win over the `{code}` capture in axum's matcher, so
//! `/health` and `/api` can never be read as short codes. Custom codes equal
//! to those names are rejected at creation for the same reason.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Browser client access
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_origin` - allowed browser origin; `None` allows any
pub fn app_router(state: AppState, cors_origin: Option<&str>) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(cors::layer(cors_origin))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
