//! Upload-analyze-render pipeline.
//!
//! Owns the selected file, the busy flag and the last rendered result.
//! Submission is split into `begin_submit`/`finish_submit` so callers that
//! share a pipeline behind a lock can run the network call without holding
//! it; `submit` composes the three steps for single-owner callers.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{RetinaError, RetinaResult};
use crate::notification::Notification;
use crate::prediction::model::{HealthStatus, PredictionResult};
use crate::prediction::PredictionService;
use crate::render::{self, model::DisplayModel};
use crate::upload::{self, CandidateFile, FileSummary, SelectedFile};

/// Snapshot of the pipeline for front-ends.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    pub selected: Option<FileSummary>,
    pub busy: bool,
    pub can_submit: bool,
    pub result: Option<DisplayModel>,
}

/// An in-flight prediction request, detached from the pipeline.
pub struct Submission {
    file: SelectedFile,
    service: Arc<dyn PredictionService>,
}

impl Submission {
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    /// Send the file to the prediction service.
    pub async fn run(self) -> RetinaResult<PredictionResult> {
        debug!(file = %self.file.file_name, size = self.file.size(), "Submitting image");
        self.service.predict(&self.file).await
    }
}

/// The pipeline itself.
pub struct Pipeline {
    service: Arc<dyn PredictionService>,
    selected: Option<SelectedFile>,
    busy: bool,
    last_render: Option<DisplayModel>,
}

impl Pipeline {
    /// Create an empty pipeline backed by the given service.
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            service,
            selected: None,
            busy: false,
            last_render: None,
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_render(&self) -> Option<&DisplayModel> {
        self.last_render.as_ref()
    }

    /// A file is selected and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.busy
    }

    pub fn state(&self) -> PipelineState {
        PipelineState {
            selected: self.selected.as_ref().map(SelectedFile::summary),
            busy: self.busy,
            can_submit: self.can_submit(),
            result: self.last_render.clone(),
        }
    }

    /// Validate a candidate and make it the selected file.
    ///
    /// A rejected candidate leaves the current selection untouched; the
    /// error's `notification()` is what to show the user.
    pub fn select(&mut self, candidate: CandidateFile) -> RetinaResult<&SelectedFile> {
        let file = match upload::validate(candidate) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "Rejected candidate file");
                return Err(e);
            }
        };

        info!(file = %file.file_name, size = file.size(), "File selected");
        self.last_render = None;
        Ok(&*self.selected.insert(file))
    }

    /// Return to the initial empty state.
    pub fn remove(&mut self) {
        self.selected = None;
        self.last_render = None;
        debug!("Selection cleared");
    }

    /// Mark the pipeline busy and hand out the request to run.
    pub fn begin_submit(&mut self) -> RetinaResult<Submission> {
        if self.busy {
            return Err(RetinaError::Busy);
        }
        let file = self.selected.clone().ok_or(RetinaError::NoFileSelected)?;

        self.busy = true;
        Ok(Submission {
            file,
            service: Arc::clone(&self.service),
        })
    }

    /// Record the outcome of a submission and return to the ready state.
    pub fn finish_submit(
        &mut self,
        outcome: RetinaResult<PredictionResult>,
    ) -> RetinaResult<&DisplayModel> {
        self.busy = false;

        match outcome {
            Ok(result) => {
                let model = render::render(&result);
                info!(
                    severity = result.severity_value.value(),
                    class = %result.severity_class,
                    confidence = result.confidence,
                    "Prediction rendered"
                );
                Ok(&*self.last_render.insert(model))
            }
            Err(e) => {
                warn!(error = %e, "Prediction failed");
                Err(e)
            }
        }
    }

    /// Submit the selected file and render the response.
    pub async fn submit(&mut self) -> RetinaResult<&DisplayModel> {
        let submission = self.begin_submit()?;
        let outcome = submission.run().await;
        self.finish_submit(outcome)
    }

    /// Startup health probe. Never fails; returns what to tell the user, if
    /// anything.
    pub async fn check_health(&self) -> Option<Notification> {
        health_notification(&self.service.health().await)
    }
}

/// Map a health probe outcome onto its notification.
pub fn health_notification(outcome: &RetinaResult<HealthStatus>) -> Option<Notification> {
    match outcome {
        Ok(health) if health.is_model_loaded() => {
            debug!(device = ?health.device, "Prediction service healthy");
            None
        }
        Ok(_) => Some(Notification::model_not_loaded()),
        Err(e) => Some(e.notification()),
    }
}
