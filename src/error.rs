//! Error types for daylog

use crate::infrastructure::blob_store::BlobError;
use crate::infrastructure::metadata_store::MetadataError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for daylog
#[derive(Debug, Error)]
pub enum DaylogError {
    /// Bad or missing input; no store was contacted.
    #[error("Invalid entry: {0}")]
    Validation(String),

    /// The blob store rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The blob store has no object at the requested path.
    #[error("Content not found: {0}")]
    NotFound(String),

    /// The metadata store rejected an insert or list.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not a daylog directory: {0}")]
    NotDaylogDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl From<BlobError> for DaylogError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::NotFound(path) => DaylogError::NotFound(path),
            other => DaylogError::Storage(other.to_string()),
        }
    }
}

impl From<MetadataError> for DaylogError {
    fn from(err: MetadataError) -> Self {
        DaylogError::Persistence(err.to_string())
    }
}

impl DaylogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DaylogError::NotDaylogDirectory(_) => 2,
            DaylogError::Validation(_) => 3,
            DaylogError::NotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DaylogError::NotDaylogDirectory(path) => {
                format!(
                    "Not a daylog directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'daylog init' in this directory to create a new log\n\
                    • Navigate to an existing daylog directory\n\
                    • Set DAYLOG_ROOT environment variable to your log path",
                    path.display()
                )
            }
            DaylogError::Validation(msg) => {
                let (body_rule, example) = if msg.contains("structured mode") {
                    (
                        "In structured mode the body is generated; omit --body and --body-file",
                        "daylog add --date 2025-08-08 --title \"Standup\" --attach notes.png",
                    )
                } else {
                    (
                        "In verbatim mode a body is required (--body or --body-file)",
                        "daylog add --date 2025-08-08 --title \"Standup\" --body-file notes.md",
                    )
                };
                format!(
                    "Invalid entry: {}\n\n\
                    Requirements:\n\
                    • --title must not be empty or span several lines\n\
                    • --date must be a calendar date between 0000 and 9999 (e.g., 2025-08-08)\n\
                    • {}\n\n\
                    Example:\n\
                    {}",
                    msg, body_rule, example
                )
            }
            DaylogError::NotFound(path) => {
                format!(
                    "No content stored at: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'daylog list' to see the slugs of existing entries\n\
                    • Slugs do not include the .md extension",
                    path
                )
            }
            DaylogError::Persistence(_) => {
                format!(
                    "{}\n\n\
                    If this happened during 'daylog add', the entry body may already be stored\n\
                    without a record. Run 'daylog orphans' to list such files.",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DaylogError
pub type Result<T> = std::result::Result<T, DaylogError>;
