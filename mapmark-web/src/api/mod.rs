//! HTTP API handlers for mapmark-web

pub mod error;
pub mod health;
pub mod markers;
pub mod transfer;
pub mod ui;

pub use error::ApiError;
pub use health::health_routes;
pub use markers::{create_marker, delete_marker, get_marker, list_markers, update_marker};
pub use transfer::{export_markers, import_markers};
pub use ui::{serve_app_js, serve_index, serve_style_css};
