//! Pipeline route handlers: select, remove, analyze.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use retina_core::upload::{FileSummary, MAX_FILE_SIZE};
use retina_core::{CandidateFile, DisplayModel, PipelineState, RetinaError};
use tracing::{debug, error};

use crate::error::ApiError;
use crate::state::{lock, AppState};
use crate::MAX_REQUEST_BYTES;

/// Multipart field the page uploads the image in.
const FILE_FIELD: &str = "file";

/// Map a multipart read failure. Bodies cut off by the request limit are
/// oversized images, so they get the validator's warning.
fn upload_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        debug!(error = %err, "Upload exceeds request limit");
        // Only a lower bound is known once the stream is cut off.
        return RetinaError::FileTooLarge {
            size: MAX_REQUEST_BYTES as u64,
            limit: MAX_FILE_SIZE,
        }
        .into();
    }
    ApiError::bad_request(err.to_string())
}

/// GET /api/state - Current pipeline snapshot.
pub async fn get_state(State(state): State<AppState>) -> Json<PipelineState> {
    Json(state.pipeline().state())
}

/// POST /api/file - Validate and select an uploaded image.
pub async fn select_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FileSummary>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(upload_error)?;
        debug!(file = %file_name, mime_type = %mime_type, size = data.len(), "Upload received");

        let candidate = CandidateFile::new(file_name, mime_type, data.to_vec());
        let summary = state.pipeline().select(candidate)?.summary();
        return Ok(Json(summary));
    }

    Err(ApiError::bad_request("No file provided"))
}

/// DELETE /api/file - Clear the selection and result.
pub async fn remove_file(State(state): State<AppState>) -> Json<PipelineState> {
    let mut pipeline = state.pipeline();
    pipeline.remove();
    Json(pipeline.state())
}

/// POST /api/analyze - Submit the selected image and render the result.
///
/// The request runs in its own task so the busy flag is cleared even if the
/// client goes away mid-request.
pub async fn analyze(State(state): State<AppState>) -> Result<Json<DisplayModel>, ApiError> {
    let submission = state.pipeline().begin_submit()?;

    let pipeline = state.pipeline.clone();
    let task = tokio::spawn(async move {
        let outcome = submission.run().await;
        let rendered = lock(&pipeline).finish_submit(outcome).cloned();
        rendered
    });

    match task.await {
        Ok(outcome) => Ok(Json(outcome?)),
        Err(e) => {
            error!(error = %e, "Analysis task failed");
            let failure = RetinaError::malformed_prediction(None);
            let notification = failure.notification();
            // The task never reached finish_submit; release the busy flag here.
            let _ = lock(&state.pipeline).finish_submit(Err(failure));
            Err(ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                notification,
            })
        }
    }
}
