//! Error types for the design-canvas engine.
//!
//! Validation failures reject the operation locally and leave the
//! document untouched; none of these are fatal to the session.

use cardkit_core::StyleError;
use thiserror::Error;

use crate::model::ObjectId;

/// Errors raised by document and editor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    /// The referenced object does not exist in the document.
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// A patch carried a property the object model does not know.
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// A patch carried a property that exists but does not apply to the
    /// target object's kind.
    #[error("Property '{property}' does not apply to {kind} objects")]
    PropertyNotApplicable {
        /// The rejected property name.
        property: String,
        /// The kind of the target object.
        kind: String,
    },

    /// A supplied value is structurally invalid.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// The field that was rejected.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// A color or gradient failed validation.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Rasterization failed.
    #[error("Render failed: {0}")]
    Render(String),
}

/// Result type alias for designer operations.
pub type DesignerResult<T> = Result<T, DesignerError>;
