//! Generator options

use serde::{Deserialize, Serialize};

/// Options honored by the generator
///
/// Read from the `[options]` table of the manifest; command-line flags
/// override individual values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Log model construction detail at debug level
    #[serde(default)]
    pub debug: bool,

    /// Whether the opaque transport may carry types with no direct representation
    #[serde(default = "default_wrap_enabled")]
    pub wrap_enabled: bool,

    /// Namespace for the navigator facade; inferred from the targets when absent
    #[serde(default)]
    pub navigator_namespace: Option<String>,

    /// Simple name of the navigator facade
    #[serde(default = "default_navigator_name")]
    pub navigator_name: String,
}

fn default_wrap_enabled() -> bool {
    true
}

fn default_navigator_name() -> String {
    "Navigator".to_string()
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            debug: false,
            wrap_enabled: default_wrap_enabled(),
            navigator_namespace: None,
            navigator_name: default_navigator_name(),
        }
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_wrap_enabled(mut self, enabled: bool) -> Self {
        self.wrap_enabled = enabled;
        self
    }

    /// Pin the navigator namespace instead of inferring it
    pub fn with_navigator_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.navigator_namespace = Some(namespace.into());
        self
    }

    pub fn with_navigator_name(mut self, name: impl Into<String>) -> Self {
        self.navigator_name = name.into();
        self
    }
}
