//! Prediction service passthrough handlers.

use axum::{extract::State, Json};
use retina_core::pipeline::health_notification;
use retina_core::{ClassCatalog, Notification};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub model_loaded: bool,
    pub status: Option<String>,
    pub device: Option<String>,
    pub notification: Option<Notification>,
}

/// GET /api/health - Probe the prediction service.
///
/// Always 200: an unhealthy or unreachable service is reported through the
/// notification, not the status code.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let outcome = state.service.health().await;
    let notification = health_notification(&outcome);

    let response = match outcome {
        Ok(health) => HealthResponse {
            model_loaded: health.is_model_loaded(),
            status: health.status,
            device: health.device,
            notification,
        },
        Err(_) => HealthResponse {
            model_loaded: false,
            status: None,
            device: None,
            notification,
        },
    };

    Json(response)
}

/// GET /api/classes - Severity class catalog.
pub async fn classes(State(state): State<AppState>) -> Result<Json<ClassCatalog>, ApiError> {
    let catalog = state.service.classes().await?;
    Ok(Json(catalog))
}
