//! Input validation for candidate images.

use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::error::{RetinaError, RetinaResult};

/// MIME types the prediction service accepts.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// Largest accepted image, inclusive (16 MiB).
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// MIME type for files whose extension is not recognised.
const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// A file offered for selection, not yet validated.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    data: Vec<u8>,
}

impl CandidateFile {
    /// A candidate whose bytes are already in memory (e.g. a browser upload).
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size: data.len() as u64,
            data,
        }
    }

    /// Load a candidate from disk, deriving its MIME type from the extension.
    ///
    /// Files over `MAX_FILE_SIZE` are not read; validation rejects them on
    /// the recorded size alone.
    pub fn from_path(path: &Path) -> RetinaResult<Self> {
        let size = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_type_for_path(path).to_string();

        let data = if size <= MAX_FILE_SIZE {
            std::fs::read(path)?
        } else {
            Vec::new()
        };

        debug!(file = %file_name, size, mime_type = %mime_type, "Loaded candidate file");

        Ok(Self {
            file_name,
            mime_type,
            size,
            data,
        })
    }
}

/// Map a path's extension onto the MIME type a browser would declare.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => UNKNOWN_MIME_TYPE,
    }
}

/// An accepted image, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    data: Vec<u8>,
}

impl SelectedFile {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size(),
        }
    }
}

/// What front-ends show about the selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

/// Accept a candidate if its declared type is an allowed image type and it
/// fits within `MAX_FILE_SIZE`. The type is checked first.
pub fn validate(candidate: CandidateFile) -> RetinaResult<SelectedFile> {
    if !ALLOWED_MIME_TYPES.contains(&candidate.mime_type.as_str()) {
        return Err(RetinaError::UnsupportedFileType(candidate.mime_type));
    }

    if candidate.size > MAX_FILE_SIZE {
        return Err(RetinaError::FileTooLarge {
            size: candidate.size,
            limit: MAX_FILE_SIZE,
        });
    }

    Ok(SelectedFile {
        file_name: candidate.file_name,
        mime_type: candidate.mime_type,
        data: candidate.data,
    })
}
