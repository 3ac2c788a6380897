//! Check command implementation

use crate::overrides::{self, Overrides};
use anyhow::Result;
use extrabind_codegen::{CodegenError, Processor};

/// Summary of a successful check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub targets: usize,
    pub builders: usize,
    pub warnings: usize,
}

/// Analyze a manifest without writing anything
pub fn run(manifest_path: &str, overrides: &Overrides) -> Result<Summary> {
    println!("Checking manifest: {manifest_path}");

    let (manifest, options) = overrides::load(manifest_path, overrides)?;
    let analysis = Processor::new(options).analyze(&manifest);

    for diagnostic in analysis.diagnostics.iter() {
        eprintln!("{}: {diagnostic}", diagnostic.element);
    }
    let errors = analysis.diagnostics.error_count();
    if errors > 0 {
        return Err(CodegenError::Failed(errors).into());
    }

    let summary = Summary {
        targets: analysis.model.len(),
        builders: analysis.builders.len(),
        warnings: analysis.diagnostics.len(),
    };
    println!("✓ Targets: {}", summary.targets);
    println!("✓ Builders: {}", summary.builders);
    println!("✓ Navigator entries: {}", analysis.navigator.entries.len());
    if summary.warnings > 0 {
        println!("! Warnings: {}", summary.warnings);
    }
    println!("\nManifest is valid!");

    Ok(summary)
}
