//! Core Error Types
//!
//! Errors raised when a field name or a profile patch does not fit the
//! schema. The application crate wraps these in its own error type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Name is neither an asked nor a derived schema field
    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    /// Patch that cannot be applied as written
    #[error("Invalid profile patch: {0}")]
    InvalidPatch(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn invalid_patch(msg: impl Into<String>) -> Self {
        Self::InvalidPatch(msg.into())
    }
}
