//! Dashboard route handler.
//!
//! Serves the embedded upload page.

use axum::response::{Html, IntoResponse};

const DASHBOARD_HTML: &str = include_str!("../../assets/index.html");

/// GET / - Serve the upload page.
pub async fn index() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}
