//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document does not have the expected shape.
    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// Serialization error.
    #[error("failed to serialize document")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::MalformedDocument { reason } => {
                format!("The file is not a valid saved tree: {reason}")
            }
            Self::Serialization { .. } => {
                "An error occurred while writing the tree data.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the file to {}. Please check disk space and permissions.",
                target_path.display()
            ),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::MalformedDocument { .. } => {
                Some("Make sure you selected a file saved by this tool.".into())
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
