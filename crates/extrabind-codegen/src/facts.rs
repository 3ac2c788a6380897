//! Scanner facts: the explicit manifest consumed by the binding model compiler
//!
//! A discovery pass that runs before the compiler (outside this crate) writes
//! everything it found into an `extrabind.toml` manifest:
//!
//! ```toml
//! [options]
//! wrap_enabled = true
//!
//! [[types]]
//! name = "com.example.BaseModel"
//! kind = "abstract"
//! supertypes = ["java.lang.Object"]
//!
//! [[fields]]
//! class = "com.example.BaseModel"
//! name = "id"
//! type = "int"
//!
//! [[targets]]
//! class = "com.example.DetailActivity"
//! model = "com.example.DetailModel"
//! ```
//!
//! Fact order is significant only for determinism: the compiler walks facts in
//! the order they appear.

use crate::GeneratorOptions;
use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full set of facts for one processing round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub options: GeneratorOptions,

    /// Type declarations answering the oracle's capability queries
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    /// `(declaringClass, fieldName, typeDescriptor, explicitKeyOrEmpty, isOptionalMarker)`
    #[serde(default)]
    pub fields: Vec<FieldFact>,

    /// `(className, associatedTargetNameOrEmpty)`
    #[serde(default)]
    pub targets: Vec<TargetFact>,
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Abstract,
    Interface,
    Enum,
}

impl ClassKind {
    /// Classes, concrete or abstract, may declare extras
    pub fn is_class(&self) -> bool {
        matches!(self, ClassKind::Class | ClassKind::Abstract)
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassKind::Class => write!(f, "class"),
            ClassKind::Abstract => write!(f, "abstract class"),
            ClassKind::Interface => write!(f, "interface"),
            ClassKind::Enum => write!(f, "enum"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

/// Field modifiers the scanner reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Transient,
    Volatile,
}

/// One declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Canonical name, e.g. `com.example.Item`
    pub name: String,

    #[serde(default)]
    pub kind: ClassKind,

    #[serde(default)]
    pub visibility: Visibility,

    /// Direct supertypes, superclass first
    #[serde(default)]
    pub supertypes: Vec<String>,

    /// Shorthand for listing `java.io.Serializable` among the supertypes
    #[serde(default)]
    pub serializable: bool,

    /// Shorthand for listing `android.os.Parcelable` among the supertypes
    #[serde(default)]
    pub parcelable: bool,

    /// Carries the opaque-transport marker annotation
    #[serde(default)]
    pub parcel_marker: bool,
}

impl TypeDecl {
    /// A public concrete class with no declared supertypes
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            visibility: Visibility::Public,
            supertypes: Vec::new(),
            serializable: false,
            parcelable: false,
            parcel_marker: false,
        }
    }

    pub fn extending(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn serializable(mut self) -> Self {
        self.serializable = true;
        self
    }

    pub fn parcelable(mut self) -> Self {
        self.parcelable = true;
        self
    }

    pub fn parcel_marker(mut self) -> Self {
        self.parcel_marker = true;
        self
    }
}

/// One annotated field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFact {
    /// Canonical name of the declaring class
    pub class: String,

    pub name: String,

    /// Declared type, e.g. `java.util.ArrayList<com.example.Item>`
    #[serde(rename = "type")]
    pub ty: String,

    /// Explicit key; blank means "use the field name"
    #[serde(default)]
    pub key: String,

    /// The field carries the nullable/optional marker
    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl FieldFact {
    pub fn new(class: impl Into<String>, name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            ty: ty.into(),
            key: String::new(),
            optional: false,
            modifiers: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// A class that is a generation root, with the model it is associated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFact {
    /// The class the built container is addressed to
    pub class: String,

    /// The model holding the extras; empty when the class is its own model
    #[serde(default)]
    pub model: String,
}

impl TargetFact {
    pub fn new(class: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            model: model.into(),
        }
    }

    /// Canonical name of the binding target this fact roots
    pub fn model_name(&self) -> &str {
        if self.model.trim().is_empty() {
            &self.class
        } else {
            &self.model
        }
    }
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Fold the facts of a later discovery round into this one.
    ///
    /// Facts already present are kept where they are, so re-adding a fact is
    /// a no-op; a re-declared type replaces the earlier declaration.
    pub fn merge(&mut self, other: Manifest) {
        for decl in other.types {
            match self.types.iter_mut().find(|t| t.name == decl.name) {
                Some(existing) => *existing = decl,
                None => self.types.push(decl),
            }
        }
        for field in other.fields {
            let seen = self
                .fields
                .iter()
                .any(|f| f.class == field.class && f.name == field.name);
            if !seen {
                self.fields.push(field);
            }
        }
        for target in other.targets {
            if !self.targets.contains(&target) {
                self.targets.push(target);
            }
        }
    }
}
