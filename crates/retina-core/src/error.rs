//! Centralized error types for the retina pipeline.

use thiserror::Error;

use crate::notification::Notification;

/// Shown when the prediction service cannot be reached at all.
pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to connect to the backend server. Please ensure it is running.";

/// Shown when an analysis produced no usable result.
pub const MALFORMED_PREDICTION_MESSAGE: &str = "Failed to analyze image. Please try again.";

/// Main error type for retina operations.
#[derive(Error, Debug)]
pub enum RetinaError {
    #[error("Please upload a PNG, JPG, or JPEG image.")]
    UnsupportedFileType(String),

    #[error("File size must be less than 16MB.")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("No file selected")]
    NoFileSelected,

    #[error("An analysis is already in progress")]
    Busy,

    /// The service answered, but not with a usable result.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },

    /// The request never reached the service.
    #[error("{0}")]
    Connectivity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for retina operations.
pub type RetinaResult<T> = Result<T, RetinaError>;

impl RetinaError {
    /// Create a transport error carrying the HTTP status it came with.
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Create the transport error for an analysis without a usable result.
    pub fn malformed_prediction(status: Option<u16>) -> Self {
        Self::transport(status, MALFORMED_PREDICTION_MESSAGE)
    }

    /// Create a connectivity error with the standard user-facing message.
    pub fn connectivity() -> Self {
        Self::Connectivity(CONNECTIVITY_MESSAGE.to_string())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors raised by the input validator.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::UnsupportedFileType(_) | Self::FileTooLarge { .. })
    }

    /// True when the request never got an answer from the service.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }

    /// The notification a front-end should surface for this error.
    pub fn notification(&self) -> Notification {
        if self.is_validation() {
            Notification::warning(self.to_string())
        } else {
            Notification::error(self.to_string())
        }
    }
}
