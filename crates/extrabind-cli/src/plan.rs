//! Plan command implementation

use crate::overrides::{self, Overrides};
use anyhow::Result;
use extrabind_codegen::Processor;

/// Render the analysis of a manifest as JSON
pub fn render(manifest_path: &str, overrides: &Overrides, compact: bool) -> Result<String> {
    let (manifest, options) = overrides::load(manifest_path, overrides)?;
    let analysis = Processor::new(options).analyze(&manifest);
    let json = if compact {
        serde_json::to_string(&analysis)?
    } else {
        serde_json::to_string_pretty(&analysis)?
    };
    Ok(json)
}

pub fn run(manifest_path: &str, overrides: &Overrides, compact: bool) -> Result<()> {
    println!("{}", render(manifest_path, overrides, compact)?);
    Ok(())
}

#[cfg(test)]
#[path = "plan/plan_tests.rs"]
mod plan_tests;
