//! Error types for the refresh settings controller.

use thiserror::Error;

use crate::settings::ValidationError;

/// Errors that can occur while driving the refresh settings modal.
#[derive(Debug, Error)]
pub enum Error {
    /// A required element is not in the document
    #[error("Required element '{id}' not found")]
    MissingElement {
        /// Element id that failed to resolve
        id: String,
    },

    /// A control exists but sits outside the controller's modal
    #[error("Element '{id}' is not inside modal '{modal_id}'")]
    NotInModal {
        /// Control id
        id: String,
        /// Modal the control should be inside
        modal_id: String,
    },

    /// Controller failed to initialize and ignores all operations
    #[error("Refresh settings controller is not initialized")]
    NotInitialized,

    /// Form input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submit is already waiting on its handler
    #[error("A refresh settings submit is already in progress")]
    SubmitInProgress,

    /// A submit result arrived with no submit pending
    #[error("No refresh settings submit is pending")]
    NoSubmitPending,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
