//! Error types for core style values.

use thiserror::Error;

/// Errors raised when validating style values (colors, gradients).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// The color string is not a recognized hex form.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The gradient specification violates a structural invariant.
    #[error("Invalid gradient: {reason}")]
    InvalidGradient {
        /// Why the gradient was rejected.
        reason: String,
    },
}

/// Result type alias for style validation.
pub type StyleResult<T> = Result<T, StyleError>;
