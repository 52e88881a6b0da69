//! Error types for the dircheck library.
//!
//! Findings about the directory data are never errors; they are reported as
//! [`Warning`](crate::validation::Warning)s. The variants below cover I/O,
//! parsing and violations of the directory contract.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dircheck operations.
#[derive(Debug, Error)]
pub enum DircheckError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed ORPHA mapping table.
    #[error("Mapping table error: {0}")]
    Mapping(String),

    /// An entity id that the directory does not know about.
    #[error("Unknown {kind} '{id}'")]
    UnknownEntity { kind: &'static str, id: String },

    /// An entity refers to another entity that does not exist.
    #[error("{kind} '{id}' refers to missing '{target}'")]
    BrokenReference {
        kind: &'static str,
        id: String,
        target: String,
    },

    /// A collection is its own ancestor.
    #[error("Collection '{id}' is part of a parent collection cycle")]
    CyclicHierarchy { id: String },

    /// The same id appears twice within one entity list.
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

/// Result type alias for dircheck operations.
pub type Result<T> = std::result::Result<T, DircheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Every variant is produced somewhere in the crate.
    fn origin(error: &DircheckError) -> &'static str {
        match error {
            DircheckError::Io { .. } => "file access",
            DircheckError::Json(_) => "snapshot, config and report files",
            DircheckError::Csv(_) => "ORPHA mapping table",
            DircheckError::Config(_) => "configuration",
            DircheckError::Mapping(_) => "ORPHA mapping table",
            DircheckError::UnknownEntity { .. }
            | DircheckError::BrokenReference { .. }
            | DircheckError::CyclicHierarchy { .. }
            | DircheckError::DuplicateId { .. } => "directory contract",
        }
    }

    #[test]
    fn test_error_messages() {
        let error = DircheckError::BrokenReference {
            kind: "collection",
            id: "c1".to_string(),
            target: "bb".to_string(),
        };
        assert_eq!(error.to_string(), "collection 'c1' refers to missing 'bb'");
        assert_eq!(origin(&error), "directory contract");

        let error = DircheckError::Mapping("empty".to_string());
        assert_eq!(error.to_string(), "Mapping table error: empty");
        assert_eq!(origin(&error), "ORPHA mapping table");
    }
}
