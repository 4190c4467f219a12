//! Error types for project persistence.
//!
//! Persistence failures never corrupt the in-memory document: the dirty
//! flag stays set and editing continues; the worst case is "continue
//! editing unsaved."

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by project stores and the persistence bridge.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// The requested project does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored design data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Thumbnail rasterization failed.
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias for persistence operations.
pub type ProjectResult<T> = Result<T, ProjectError>;
