//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use biographer_core::CoreError;
use biographer_knowledge::KnowledgeError;
use biographer_llm::LlmError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed requests (e.g. an empty message)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Profile store read/write failures
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Oracle failures that reach the caller (e.g. provider construction)
    #[error("Oracle error: {0}")]
    Oracle(#[from] LlmError),

    /// Knowledge base loading failures
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    /// Unknown field names and malformed profile patches
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert AppError to a string suitable for caller-facing responses
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::persistence("store offline");
        assert_eq!(err.to_string(), "Persistence error: store offline");
    }

    #[test]
    fn test_error_conversion() {
        let err = AppError::config("invalid setting");
        let msg: String = err.into();
        assert!(msg.contains("Configuration error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_crate_error_conversions() {
        let err: AppError = LlmError::Timeout { seconds: 3 }.into();
        assert!(matches!(err, AppError::Oracle(_)));

        let err: AppError = KnowledgeError::Load("bad".to_string()).into();
        assert!(err.to_string().starts_with("Knowledge base error"));

        let err: AppError = CoreError::unknown_field("star").into();
        assert!(matches!(err, AppError::Core(_)));
    }
}
