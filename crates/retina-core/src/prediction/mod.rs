//! Prediction service contract.

pub mod model;

use async_trait::async_trait;

use crate::error::RetinaResult;
use crate::upload::SelectedFile;
use model::{ClassCatalog, HealthStatus, PredictionResult};

/// Remote service that grades retinal images.
///
/// Implementations map failures onto `RetinaError::Transport` (the service
/// answered badly) and `RetinaError::Connectivity` (no answer at all).
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// `GET /health`.
    async fn health(&self) -> RetinaResult<HealthStatus>;

    /// `POST /predict` with the image as multipart field `file`.
    async fn predict(&self, file: &SelectedFile) -> RetinaResult<PredictionResult>;

    /// `GET /classes`.
    async fn classes(&self) -> RetinaResult<ClassCatalog>;
}
