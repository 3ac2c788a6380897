//! Error types and diagnostics for the binding model compiler

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for codegen operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// A problem with one declaration.
///
/// Reported once per offending element; processing continues with the
/// remaining declarations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{class}.{field}: extra fields must not be private")]
    PrivateField { class: String, field: String },

    #[error("{class}.{field}: extra fields must not be static")]
    StaticField { class: String, field: String },

    /// The enclosing type is an interface or an enum
    #[error("{class}.{field}: extra fields may only be declared in classes, not in an {kind}")]
    InvalidEnclosingKind {
        class: String,
        field: String,
        kind: String,
    },

    #[error("{class}.{field}: the enclosing class must not be private")]
    PrivateEnclosingClass { class: String, field: String },

    #[error("{class}.{field}: key '{key}' is not a valid identifier")]
    InvalidKey {
        class: String,
        field: String,
        key: String,
    },

    #[error("{class}.{field}: malformed type '{descriptor}': {reason}")]
    MalformedType {
        class: String,
        field: String,
        descriptor: String,
        reason: String,
    },

    /// The classifier found no way to store the type in a bundle
    #[error("{class}.{field}: type {ty} cannot be stored as an extra")]
    InvalidType {
        class: String,
        field: String,
        ty: String,
    },

    #[error("{class}: supertype chain loops back through {through}")]
    CyclicHierarchy { class: String, through: String },

    /// Two required keys capitalize to the same builder state class
    #[error("{class}: required keys '{first}' and '{second}' both name builder state {state}")]
    StateNameCollision {
        class: String,
        first: String,
        second: String,
        state: String,
    },

    #[error("{class}: already associated with {existing}, ignoring {ignored}")]
    DuplicateAssociation {
        class: String,
        existing: String,
        ignored: String,
    },
}

impl ModelError {
    /// The element the diagnostic is attached to
    pub fn element(&self) -> String {
        match self {
            ModelError::PrivateField { class, field }
            | ModelError::StaticField { class, field }
            | ModelError::InvalidEnclosingKind { class, field, .. }
            | ModelError::PrivateEnclosingClass { class, field }
            | ModelError::InvalidKey { class, field, .. }
            | ModelError::MalformedType { class, field, .. }
            | ModelError::InvalidType { class, field, .. } => format!("{class}.{field}"),
            ModelError::CyclicHierarchy { class, .. }
            | ModelError::StateNameCollision { class, .. }
            | ModelError::DuplicateAssociation { class, .. } => class.clone(),
        }
    }
}

/// Failure writing one generated type
#[derive(Error, Debug)]
pub enum EmissionError {
    #[error("failed to write {type_name} for {origin}: {source}")]
    Write {
        origin: String,
        type_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The type was already written in an earlier round
    #[error("{type_name} for {origin} was already generated")]
    AlreadyGenerated { origin: String, type_name: String },
}

impl EmissionError {
    pub fn origin(&self) -> &str {
        match self {
            EmissionError::Write { origin, .. } | EmissionError::AlreadyGenerated { origin, .. } => {
                origin
            }
        }
    }
}

/// Errors loading the fact manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level error for callers driving the whole pipeline
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("{0} error(s) reported while processing")]
    Failed(usize),
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// One reported problem attached to an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub element: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: {}", self.message)
    }
}

/// Diagnostics collected over one processing round
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&mut self, err: ModelError) {
        tracing::error!(element = %err.element(), "{err}");
        self.items.push(Diagnostic {
            severity: Severity::Error,
            element: err.element(),
            message: err.to_string(),
        });
    }

    pub fn emission(&mut self, err: &EmissionError) {
        tracing::error!(element = %err.origin(), "{err}");
        self.items.push(Diagnostic {
            severity: Severity::Error,
            element: err.origin().to_string(),
            message: err.to_string(),
        });
    }

    pub fn warning(&mut self, element: impl Into<String>, message: impl Into<String>) {
        let (element, message) = (element.into(), message.into());
        tracing::warn!(element = %element, "{message}");
        self.items.push(Diagnostic {
            severity: Severity::Warning,
            element,
            message,
        });
    }

    pub fn error_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Diagnostics attached to one element
    pub fn for_element<'a>(&'a self, element: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.items.iter().filter(move |d| d.element == element)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append another round's diagnostics
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }
}
