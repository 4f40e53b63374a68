//! Unified error handling.
//!
//! Inner operations return `Result<T, AppError>` and propagate with `?`.
//! The page session is the boundary: it logs these errors with `tracing` and
//! falls back to a safe state, so none of them ever reaches the shopper.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the cart runtime.
#[derive(Debug, Error)]
pub enum AppError {
    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart JSON could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Configuration was rejected.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// An element the operation needs is not in the document.
    #[error("Element not found: {0}")]
    MissingElement(String),
}

impl AppError {
    /// Log the error at the page boundary.
    ///
    /// Storage and rendering failures mean the shopper's view or saved cart
    /// may now be stale, so they are logged at `error`. The rest are `warn`.
    pub fn report(&self, context: &str) {
        match self {
            Self::Storage(_) | Self::Serialization(_) | Self::Render(_) => {
                tracing::error!(error = %self, "{context}");
            }
            Self::Config(_) | Self::MissingElement(_) => {
                tracing::warn!(error = %self, "{context}");
            }
        }
    }
}

/// Result type alias for cart runtime operations.
pub type Result<T> = std::result::Result<T, AppError>;
