use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("record `{schema}` must be backed by a JSON object, got {actual}")]
    NotAnObject { schema: String, actual: &'static str },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Why a [`MemberAccessor::try_set`](crate::MemberAccessor::try_set) call
/// did not write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetError {
    /// The type exposes no member with that name.
    #[error("unknown member")]
    UnknownMember,

    /// The member exists but cannot be written.
    #[error("member is read-only")]
    ReadOnly,

    /// The member exists but cannot hold the supplied value.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
