//! extrabind-codegen - Binding model compiler and type-state builder generator
//!
//! Turns scanner facts about annotated extra fields into Java sources:
//! an extraction routine per class and a type-state builder per generation
//! root that cannot reach `build()` before every required extra is set.
//!
//! # Pipeline
//!
//! ```text
//! extrabind.toml
//!     ↓
//!  [facts]      Manifest
//!     ↓
//!  [binding]    BindingSet (one target per declaring class)
//!     ↓
//!  [hierarchy]  linked forest, merged groups, closest required ancestors
//!     ↓
//!  [plan]       BuilderPlan / InjectionPlan, [navigator] NavigatorPlan
//!     ↓
//!  [java]       *.java through a SourceSink
//! ```
//!
//! # Usage
//!
//! ```rust
//! use extrabind_codegen::{Manifest, MemorySink, Processor};
//!
//! let manifest = Manifest::from_str(r#"
//! [[fields]]
//! class = "com.example.Detail"
//! name = "id"
//! type = "int"
//!
//! [[targets]]
//! class = "com.example.Detail"
//! "#).unwrap();
//!
//! let mut sink = MemorySink::new();
//! let report = Processor::default().process(&manifest, &mut sink);
//!
//! assert!(report.diagnostics.is_empty());
//! assert!(sink.get("com.example.Detail__IntentBuilder").is_some());
//! ```

pub mod binding;
pub mod classify;
pub mod error;
pub mod facts;
pub mod hierarchy;
pub mod java;
pub mod model;
pub mod naming;
pub mod navigator;
pub mod options;
pub mod oracle;
pub mod plan;
pub mod processor;
pub mod sink;
pub mod types;

pub use classify::{BundleAccessor, Classification, classify};
pub use error::{
    CodegenError, CodegenResult, Diagnostic, Diagnostics, EmissionError, ManifestError, ModelError,
    Severity,
};
pub use facts::{ClassKind, FieldFact, Manifest, Modifier, TargetFact, TypeDecl, Visibility};
pub use model::{BindingSet, BindingTarget, ExtraGroup, FieldBinding, GroupId, TargetId};
pub use navigator::NavigatorPlan;
pub use options::GeneratorOptions;
pub use oracle::{ManifestOracle, TypeOracle};
pub use plan::{BuilderPlan, InitialState, InjectionPlan};
pub use processor::{Analysis, Processor, Report, Session};
pub use sink::{FileSink, MemorySink, SourceSink};
pub use types::{Primitive, TypeDescriptor};
