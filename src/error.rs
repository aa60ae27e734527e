//! Error types for the telemetry preparation pipeline.
//!
//! Only boundary operations fail: fetching a session record, loading a track
//! graphic, and reading configuration or catalog documents. Filtering, series
//! construction, axis ranges and overlay mapping represent absent or malformed
//! data in their outputs instead of returning errors.
//!
//! ## Error Categories
//!
//! - **Data absence at the boundary**: the requested session file or track graphic does not exist
//! - **Storage errors**: reading a document from disk failed
//! - **Parse errors**: a document exists but is not valid JSON/YAML for its type
//! - **Lookup errors**: a track identifier or graphic resource is not known
//!
//! ## Recovery
//!
//! ```rust
//! use paddock::PaddockError;
//!
//! let error = PaddockError::unknown_track("atlantis");
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::SessionKey;

/// Result type alias for boundary operations.
pub type Result<T, E = PaddockError> = std::result::Result<T, E>;

/// Main error type for boundary operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PaddockError {
    #[error("Session data not found for {key}")]
    SessionNotFound {
        key: SessionKey,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Unknown track: {track_id}")]
    UnknownTrack { track_id: String },

    #[error("Unsupported track SVG: {resource}")]
    UnsupportedGraphic { resource: String },

    #[error("Failed to load {resource}: {source}")]
    GraphicLoad {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl PaddockError {
    /// Returns whether retrying the same operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            PaddockError::File { source, .. } | PaddockError::GraphicLoad { source, .. } => {
                !matches!(source.kind(), std::io::ErrorKind::NotFound)
            }
            PaddockError::SessionNotFound { .. } => false,
            PaddockError::Parse { .. } => false,
            PaddockError::UnknownTrack { .. } => false,
            PaddockError::UnsupportedGraphic { .. } => false,
            PaddockError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            PaddockError::SessionNotFound { .. } => vec![
                "Check the year, round and session identifiers",
                "Generate the session dataset before requesting it",
            ],
            PaddockError::File { .. } => vec![
                "Check the file exists and is readable",
                "Verify the configured data root",
            ],
            PaddockError::Parse { .. } => vec![
                "Regenerate the document",
                "Verify the document matches the expected schema",
            ],
            PaddockError::UnknownTrack { .. } => vec![
                "Check the track identifier against the track catalog",
                "Add the track to the catalog document",
            ],
            PaddockError::UnsupportedGraphic { .. } => vec![
                "Use a plain file name for the track graphic",
                "Check the graphic name in the track catalog",
            ],
            PaddockError::GraphicLoad { .. } => vec![
                "Check the track graphic exists in the tracks directory",
                "Verify the configured tracks directory",
            ],
            PaddockError::Config { .. } => vec![
                "Check the configuration file syntax",
                "Remove unknown or mistyped keys",
            ],
        }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PaddockError::File { path: path.into(), source }
    }

    /// Helper constructor for document parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl ToString) -> Self {
        PaddockError::Parse { context: context.into(), details: details.to_string() }
    }

    /// Helper constructor for unknown track identifiers.
    pub fn unknown_track(track_id: impl Into<String>) -> Self {
        PaddockError::UnknownTrack { track_id: track_id.into() }
    }

    /// Helper constructor for graphic load failures.
    pub fn graphic_load(resource: impl Into<String>, source: std::io::Error) -> Self {
        PaddockError::GraphicLoad { resource: resource.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        PaddockError::Config { reason: reason.into() }
    }

    /// Full message including every source in the chain.
    ///
    /// Error states shown to the user keep the underlying reason, so the
    /// chain is flattened into one line.
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(source) = current {
            let text = source.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            current = source.source();
        }
        message
    }
}
