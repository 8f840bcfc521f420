//! Error types for the portfolio renderer

use std::path::PathBuf;

use thiserror::Error;

use crate::renderer::FailureKind;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching, previewing or serving documents
#[derive(Error, Debug)]
pub enum Error {
    /// A local asset (certificate, photo, resume) could not be read
    #[error("File not found: {}", .0.display())]
    MissingLocalAsset(PathBuf),

    /// A remote fetch failed at the transport level or returned a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// The fetched bytes are not a readable document or image
    #[error("Could not decode document: {0}")]
    Decode(String),

    /// Building a preview failed after the document was decoded
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error outside of asset reads (writing output, binding sockets)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify the error into the per-entry failure taxonomy.
    ///
    /// Returns `None` for errors that are not about a single document
    /// (configuration, output I/O).
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Error::MissingLocalAsset(_) => Some(FailureKind::MissingLocalAsset),
            Error::Network(_) => Some(FailureKind::NetworkFailure),
            Error::Decode(_) | Error::Render(_) => Some(FailureKind::DecodeFailure),
            Error::Config(_) | Error::Io(_) | Error::Json(_) => None,
        }
    }
}
