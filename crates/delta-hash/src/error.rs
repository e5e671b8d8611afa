//! Error types for the hash crate.

/// Errors that can occur while canonicalizing or hashing a document.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HashError {
    /// The input is not a key/value document.
    #[error("format error: {0}")]
    Format(String),

    /// A value could not be turned into a document.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HashError {
    fn from(e: serde_json::Error) -> Self {
        HashError::Serialization(e.to_string())
    }
}

/// Convenience alias for hash results.
pub type HashResult<T> = Result<T, HashError>;
