//! Manifest loading and command-line option overrides

use anyhow::{Context, Result};
use extrabind_codegen::{GeneratorOptions, Manifest};

/// Command-line values that take precedence over the manifest `[options]` table
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub debug: bool,
    pub no_wrap: bool,
    pub namespace: Option<String>,
    pub navigator_name: Option<String>,
}

impl Overrides {
    /// Flags only ever switch things on; unset flags keep the manifest value
    pub fn apply(&self, mut options: GeneratorOptions) -> GeneratorOptions {
        if self.debug {
            options.debug = true;
        }
        if self.no_wrap {
            options.wrap_enabled = false;
        }
        if let Some(namespace) = &self.namespace {
            options.navigator_namespace = Some(namespace.clone());
        }
        if let Some(name) = &self.navigator_name {
            options.navigator_name = name.clone();
        }
        options
    }
}

/// Load a manifest and resolve the effective generator options
pub fn load(path: &str, overrides: &Overrides) -> Result<(Manifest, GeneratorOptions)> {
    let manifest =
        Manifest::from_file(path).with_context(|| format!("Failed to load manifest: {path}"))?;
    let options = overrides.apply(manifest.options.clone());
    tracing::debug!(
        path,
        fields = manifest.fields.len(),
        targets = manifest.targets.len(),
        "loaded manifest"
    );
    Ok((manifest, options))
}

#[cfg(test)]
#[path = "overrides/overrides_tests.rs"]
mod overrides_tests;
