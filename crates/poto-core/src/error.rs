use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PotoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Project document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Filename {file_name} does not match the expected pattern: {reason}")]
    Parse { file_name: String, reason: String },

    #[error("No FITS files found in {0}")]
    NoFrames(PathBuf),

    #[error("No matching sequence: {0}")]
    NoMatch(String),

    #[error("Inconsistent project: {0}")]
    Inconsistent(String),

    #[error("Project version mismatch. Expected {expected}, got {found}. Regenerate the project with the prepare command")]
    SchemaVersionMismatch { expected: String, found: String },

    #[error("Project directory not usable: {0}")]
    DirectoryState(String),

    #[error("{choice:?} is not one of the offered choices for {subject}")]
    InvalidChoice { subject: String, choice: String },

    #[error("Temperature tolerance must be >= {min}, got {value}")]
    InvalidTolerance { value: f64, min: f64 },

    #[error("Script {script} failed with status {status}")]
    ScriptFailed { script: PathBuf, status: String },

    #[error("Aborted by the operator")]
    Cancelled,
}

impl PotoError {
    pub(crate) fn parse(file_name: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            file_name: file_name.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors that represent the operator stopping the run.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DirectoryState(_))
    }
}

pub type Result<T> = std::result::Result<T, PotoError>;
