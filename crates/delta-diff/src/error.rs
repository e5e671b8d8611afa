//! Error types for the diff crate.

/// Errors that can occur while computing or applying a diff.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// The two compared instances do not share a shape.
    #[error("type mismatch: cannot compare `{left}` with `{right}`")]
    TypeMismatch { left: String, right: String },

    /// A patch targets a member that is missing or read-only.
    #[error("member not writable: {path}")]
    MemberNotWritable { path: String },

    /// A patch value cannot be stored in the targeted member.
    #[error("invalid value for member {path}: {reason}")]
    InvalidValue { path: String, reason: String },

    /// A diff operation was given an empty member path.
    #[error("diff operation path must not be empty")]
    EmptyPath,
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
