//! Application state.

use retina_core::{Pipeline, PredictionService};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Application state shared across handlers.
///
/// The pipeline lock is only ever held for synchronous steps; network calls
/// run with it released.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Mutex<Pipeline>>,
    pub service: Arc<dyn PredictionService>,
}

impl AppState {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            pipeline: Arc::new(Mutex::new(Pipeline::new(Arc::clone(&service)))),
            service,
        }
    }

    /// Lock the pipeline.
    pub fn pipeline(&self) -> MutexGuard<'_, Pipeline> {
        lock(&self.pipeline)
    }
}

/// Lock a pipeline, recovering from poisoning since its state is always
/// left consistent between statements.
pub fn lock(pipeline: &Mutex<Pipeline>) -> MutexGuard<'_, Pipeline> {
    pipeline.lock().unwrap_or_else(PoisonError::into_inner)
}
