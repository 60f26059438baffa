//! Retina Core Library
//!
//! Domain model and pipeline for grading retinal images against a remote
//! diabetic-retinopathy prediction service: validate the upload, submit it,
//! and derive what to display from the response.

pub mod config;
pub mod error;
pub mod notification;
pub mod pipeline;
pub mod prediction;
pub mod render;
pub mod upload;

pub use config::ClientConfig;
pub use error::{RetinaError, RetinaResult};
pub use notification::{Notification, NotificationLevel};
pub use pipeline::{Pipeline, PipelineState, Submission};
pub use prediction::model::{ClassCatalog, HealthStatus, PredictionResult, Severity, SeverityInfo};
pub use prediction::PredictionService;
pub use render::model::DisplayModel;
pub use upload::{CandidateFile, SelectedFile};
