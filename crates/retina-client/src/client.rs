//! HTTP client for the prediction service.
//!
//! Talks to `{base}/health`, `{base}/predict` and `{base}/classes`. Each call
//! is a single attempt: no retries and no request timeout beyond what the
//! platform imposes.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use retina_core::error::MALFORMED_PREDICTION_MESSAGE;
use retina_core::prediction::model::ErrorBody;
use retina_core::upload::SelectedFile;
use retina_core::{
    ClassCatalog, ClientConfig, HealthStatus, PredictionResult, PredictionService, RetinaError,
    RetinaResult,
};

/// Shown when `/predict` fails without an `error` message of its own.
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";

/// Shown when `/classes` cannot be loaded.
pub const CLASSES_FAILED_MESSAGE: &str = "Failed to load severity classes";

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// Prediction service client.
#[derive(Clone)]
pub struct PredictionClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl PredictionClient {
    /// Create a client for the given service.
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder().build().unwrap_or_default();
        Self { config, client }
    }

    async fn get(&self, path: &str) -> RetinaResult<Response> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "GET");
        self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Prediction service unreachable");
            RetinaError::connectivity()
        })
    }
}

/// Read a response body, mapping statuses and parse failures onto
/// transport errors.
async fn read_json<T: DeserializeOwned>(
    response: Response,
    failed_message: &str,
    malformed_message: &str,
) -> RetinaResult<T> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        warn!(status = %status, error = %e, "Failed to read response body");
        RetinaError::connectivity()
    })?;

    if !status.is_success() {
        let message = ErrorBody::message_from(&body).unwrap_or_else(|| failed_message.to_string());
        warn!(status = %status, message = %message, "Prediction service returned an error");
        return Err(RetinaError::transport(Some(status.as_u16()), message));
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!(status = %status, error = %e, "Failed to parse prediction service response");
        RetinaError::transport(Some(status.as_u16()), malformed_message)
    })
}

#[async_trait]
impl PredictionService for PredictionClient {
    /// Any failure to obtain a readable health body counts as connectivity.
    async fn health(&self) -> RetinaResult<HealthStatus> {
        let response = self.get("health").await?;
        let status = response.status();
        let body = response.text().await.map_err(|_| RetinaError::connectivity())?;

        let health: HealthStatus = serde_json::from_str(&body).map_err(|e| {
            warn!(status = %status, error = %e, "Unreadable health response");
            RetinaError::connectivity()
        })?;

        debug!(
            status = %status,
            model_loaded = health.is_model_loaded(),
            device = ?health.device,
            "Health check completed"
        );
        Ok(health)
    }

    async fn predict(&self, file: &SelectedFile) -> RetinaResult<PredictionResult> {
        let url = self.config.endpoint("predict");

        let part = Part::bytes(file.data().to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| RetinaError::transport(None, format!("Invalid MIME type: {}", e)))?;
        let form = Form::new().part(FILE_FIELD, part);

        debug!(url = %url, file = %file.file_name, size = file.size(), "POST");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Prediction service unreachable");
                RetinaError::connectivity()
            })?;

        let result: PredictionResult =
            read_json(response, PREDICTION_FAILED_MESSAGE, MALFORMED_PREDICTION_MESSAGE).await?;

        info!(
            severity = result.severity_value.value(),
            confidence = result.confidence,
            "Prediction received"
        );
        Ok(result)
    }

    async fn classes(&self) -> RetinaResult<ClassCatalog> {
        let response = self.get("classes").await?;
        read_json(response, CLASSES_FAILED_MESSAGE, CLASSES_FAILED_MESSAGE).await
    }
}
