//! Retina Web Server
//!
//! Axum-based browser front-end: serves the upload page and exposes the
//! pipeline as a small JSON API the page drives.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use retina_core::upload::MAX_FILE_SIZE;
use retina_core::PredictionService;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Largest request body accepted. Twice the image limit, so oversized images
/// up to this size reach the validator and get its message.
pub const MAX_REQUEST_BYTES: usize = 2 * MAX_FILE_SIZE as usize;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(routes::service::health))
        .route("/classes", get(routes::service::classes))
        .route("/state", get(routes::pipeline::get_state))
        .route(
            "/file",
            post(routes::pipeline::select_file).delete(routes::pipeline::remove_file),
        )
        .route("/analyze", post(routes::pipeline::analyze))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::dashboard::index))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(
    service: Arc<dyn PredictionService>,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState::new(service);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
