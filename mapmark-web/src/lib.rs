//! mapmark-web library - HTTP service for the MapMark annotation app
//!
//! Serves the embedded browser UI and the marker REST API backed by the
//! shared SQLite store.

use axum::Router;
use mapmark_common::config::MapProviderConfig;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Map-provider credentials injected into the served index page
    pub map_provider: MapProviderConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, map_provider: MapProviderConfig) -> Self {
        Self { db, map_provider }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        // Static routes must be registered alongside the :id routes;
        // axum matches the literal segment first.
        .route(
            "/api/markers",
            get(api::list_markers).post(api::create_marker),
        )
        .route(
            "/api/markers/:id",
            get(api::get_marker)
                .put(api::update_marker)
                .delete(api::delete_marker),
        )
        .route("/api/markers/export", get(api::export_markers))
        .route("/api/markers/import", axum::routing::post(api::import_markers))
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/style.css", get(api::serve_style_css))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
