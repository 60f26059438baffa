//! HTTP mapping of pipeline errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use retina_core::{Notification, RetinaError};
use serde_json::json;

/// Error returned by API handlers: a status plus the notification to show.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub notification: Notification,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            notification: Notification::error(message),
        }
    }
}

impl From<RetinaError> for ApiError {
    fn from(err: RetinaError) -> Self {
        let status = match &err {
            RetinaError::UnsupportedFileType(_) | RetinaError::FileTooLarge { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RetinaError::NoFileSelected => StatusCode::BAD_REQUEST,
            RetinaError::Busy => StatusCode::CONFLICT,
            RetinaError::Transport { .. } => StatusCode::BAD_GATEWAY,
            RetinaError::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            RetinaError::Io(_) | RetinaError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            notification: err.notification(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.notification.message,
            "notification": self.notification,
        });
        (self.status, Json(body)).into_response()
    }
}
