//! Knowledge Base Errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// No entry matched, exactly or fuzzily
    #[error("Unknown gothra: {0}")]
    UnknownGothra(String),

    /// An entry exists but cannot be used (e.g. no Pravara options)
    #[error("Malformed knowledge entry: {0}")]
    MalformedEntry(String),

    /// Replacement tables could not be read or parsed
    #[error("Failed to load knowledge tables: {0}")]
    Load(String),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

impl From<std::io::Error> for KnowledgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Load(err.to_string())
    }
}

impl From<serde_json::Error> for KnowledgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Load(err.to_string())
    }
}
