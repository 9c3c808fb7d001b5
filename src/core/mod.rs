use std::path::Path;

use thiserror::Error;

/// Error types for the Reelview crate.
///
/// Covers configuration loading and the filesystem work around it. Playback
/// operations never surface errors to callers; see
/// [`PlaybackError`](crate::services::playback::PlaybackError) for the
/// collaborator failures the controller logs and absorbs.
#[derive(Error, Debug)]
pub enum ReelviewError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: std::path::PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for Reelview operations.
pub type Result<T> = std::result::Result<T, ReelviewError>;

impl ReelviewError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ReelviewError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error tagged with the path it happened on.
    pub fn io_at(error: impl std::fmt::Display, path: &Path) -> Self {
        ReelviewError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
