//! Java source emission
//!
//! Each emitter renders one plan into a [`GeneratedSource`]:
//!
//! ```text
//! BuilderPlan    → [intent_builder] → Foo__IntentBuilder.java
//! InjectionPlan  → [extra_binder]   → Foo__ExtraBinder.java
//! NavigatorPlan  → [navigator]      → Navigator.java, ExtraBinders.java
//! ```
//!
//! Output depends only on the plan, so unchanged input renders byte-identical
//! sources.

pub mod extra_binder;
pub mod intent_builder;
pub mod navigator;

use serde::Serialize;

/// Package of the runtime library generated code links against
pub const RUNTIME_PACKAGE: &str = "extrabind";

/// Fully qualified opaque transport entry point
pub const PARCELS: &str = "org.parceler.Parcels";

pub const PARCELABLE: &str = "android.os.Parcelable";

const HEADER: &str = "// Generated code from extrabind. Do not modify!";

/// One generated compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    pub namespace: String,
    pub type_name: String,
    /// Class the source was generated for, diagnostics attach here
    pub origin: String,
    pub contents: String,
}

impl GeneratedSource {
    pub fn qualified_name(&self) -> String {
        crate::naming::qualified(&self.namespace, &self.type_name)
    }
}

/// Indenting line writer
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    code: String,
    depth: usize,
}

impl SourceWriter {
    /// Start a compilation unit in `namespace`
    pub(crate) fn unit(namespace: &str) -> Self {
        let mut writer = Self::default();
        writer.line(HEADER);
        if !namespace.is_empty() {
            writer.line(&format!("package {namespace};"));
        }
        writer.blank();
        writer
    }

    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.code.push_str("  ");
        }
        self.code.push_str(text);
        self.code.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.code.push('\n');
    }

    /// Write `header {` and indent
    pub(crate) fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.depth += 1;
    }

    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub(crate) fn finish(self) -> String {
        self.code
    }
}
