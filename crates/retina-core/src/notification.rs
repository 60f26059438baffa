//! Transient user-facing notifications.
//!
//! Front-ends decide how to show these (a toast in the browser, a coloured
//! line in the terminal); the pipeline only decides what to say.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Warning raised when the service reports that no model is loaded.
pub const MODEL_NOT_LOADED_MESSAGE: &str =
    "Model not loaded. Please check the backend configuration.";

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A message to surface to the user without blocking the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        let message = message.into();
        if level != NotificationLevel::Info {
            warn!(level = level.as_str(), message = %message, "Notification raised");
        }
        Self { level, message }
    }

    /// The warning shown when the service is up but has no model.
    pub fn model_not_loaded() -> Self {
        Self::warning(MODEL_NOT_LOADED_MESSAGE)
    }
}
