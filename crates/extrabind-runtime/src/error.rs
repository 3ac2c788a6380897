//! Error types for the extrabind runtime

use thiserror::Error;

/// Result type alias for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Error type for runtime operations
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A required extra was absent from the source
    ///
    /// `fields` is the human-readable join produced by [`crate::describe_fields`].
    #[error(
        "Required extra with key '{key}' for {fields} was not found. \
         If this extra is optional, mark the field as nullable."
    )]
    RequiredExtraMissing { key: String, fields: String },

    /// No binder is registered for the requested class
    #[error("no extra binder registered for {0}")]
    UnknownBinder(String),

    /// The finder was asked to read from a source of a different kind
    #[error("source mismatch: finder expects {expected} source, got {actual}")]
    SourceMismatch { expected: String, actual: String },

    /// The binder was handed a target of the wrong type
    #[error("target type mismatch for binder {0}")]
    TargetMismatch(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Opaque transport failed to wrap or unwrap a value
    #[error("parceler error: {0}")]
    Parceler(String),
}

impl RuntimeError {
    /// Whether this error is the fail-fast missing-extra signal
    pub fn is_required_extra_missing(&self) -> bool {
        matches!(self, RuntimeError::RequiredExtraMissing { .. })
    }
}

impl From<serde_json::Error> for RuntimeError {
    fn from(err: serde_json::Error) -> Self {
        RuntimeError::Serialization(err.to_string())
    }
}
