//! UI serving routes
//!
//! Serves the embedded HTML/JS/CSS for the map page. The map-provider key
//! and security code are injected into the index page at serve time, so
//! the browser never mutates a global config object.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::AppState;

const INDEX_HTML: &str = include_str!("../ui/index.html");
const APP_JS: &str = include_str!("../ui/app.js");
const STYLE_CSS: &str = include_str!("../ui/style.css");

/// GET /
///
/// Serves the main UI page with map-provider credentials filled in
pub async fn serve_index(State(state): State<AppState>) -> Html<String> {
    let html = INDEX_HTML
        .replace("__AMAP_KEY__", &state.map_provider.api_key)
        .replace("__AMAP_SECURITY_CODE__", &state.map_provider.security_code);
    Html(html)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// GET /static/style.css
pub async fn serve_style_css() -> Response {
    (StatusCode::OK, [("content-type", "text/css")], STYLE_CSS).into_response()
}
