//! Error types for reconview.

use thiserror::Error;

/// The main error type for reconview operations.
///
/// Every variant is recoverable: the viewer degrades to an idle or error
/// state and keeps accepting dataset updates and camera input.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The model has no points to render.
    #[error("model '{0}' has no points")]
    EmptyDataset(String),

    /// The model's arrays violate the length invariant.
    #[error("{reason}")]
    MalformedDataset {
        /// Name of the offending model.
        model: String,
        /// Human-readable description, e.g. "Invalid data length: 7".
        reason: String,
    },

    /// A selection was requested for a model that is not registered.
    #[error("model '{0}' is not available")]
    InvalidSelection(String),

    /// The reconstruction service reported a failure instead of data.
    #[error("reconstruction failed: {0}")]
    Payload(String),

    /// Exporting a rendered frame failed.
    #[error("export error: {0}")]
    Export(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ViewerError {
    /// Builds a [`ViewerError::MalformedDataset`] for the given model.
    pub fn malformed(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDataset {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for reconview operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
