use std::path::PathBuf;

use thiserror::Error;

use crate::models::FileType;

/// Why a single file could not be turned into text.
///
/// The `Display` form is the human-readable failure reason handed to callers
/// and recorded in batch reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("File not found")]
    FileNotFound,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("{} extraction error: {detail}", .format.error_label())]
    ExtractionFailure { format: FileType, detail: String },
}

impl ExtractionError {
    pub fn failure(format: FileType, detail: impl std::fmt::Display) -> Self {
        Self::ExtractionFailure {
            format,
            detail: detail.to_string(),
        }
    }
}

/// List-level preconditions that abort a batch run before any file is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No supported files found in {}", .0.display())]
    NoMatchingFiles(PathBuf),

    #[error("Invalid file pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

#[derive(Error, Debug)]
pub enum DoctextError {
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DoctextError>;
