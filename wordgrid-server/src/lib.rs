//! wordgrid-server library - HTTP layer over the puzzle store
//!
//! Route handlers translate requests into `wordgrid_common::db` calls and
//! absent results into 404 responses. Anything not under `/api` or `/health`
//! is served from the static site directory.

use axum::Router;
use sqlx::SqlitePool;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use wordgrid_common::db::rotation::RotationBoundary;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Boundary policy for resolving the current rotation puzzle
    pub rotation_boundary: RotationBoundary,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, rotation_boundary: RotationBoundary) -> Self {
        Self {
            db,
            rotation_boundary,
        }
    }
}

/// Build application router
///
/// With `site_dir`, unmatched paths are served from it and unknown files get
/// its `404.html` with a 404 status.
pub fn build_router(state: AppState, site_dir: Option<&Path>) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/puzzles", get(api::list_puzzles))
        .route("/api/puzzle/:id", get(api::get_puzzle))
        .route("/api/latestpuzzle", get(api::latest_puzzle))
        .route(
            "/api/rotation",
            get(api::list_rotation).post(api::add_rotation_entry),
        )
        .route("/api/rotation/current", get(api::current_rotation))
        .route(
            "/api/progress/:user/:puzzle",
            get(api::get_progress).post(api::record_progress),
        )
        .merge(api::health_routes());

    let router = match site_dir {
        Some(site) => api.fallback_service(
            ServeDir::new(site).not_found_service(ServeFile::new(site.join("404.html"))),
        ),
        None => api.fallback(api::not_found),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
