//! Generate command implementation

use crate::overrides::{self, Overrides};
use anyhow::{Context, Result};
use extrabind_codegen::{FileSink, Processor};
use std::path::Path;

/// Generate Java sources for every target in the manifest
pub fn run(manifest_path: &str, output: &str, overrides: &Overrides) -> Result<()> {
    let (manifest, options) = overrides::load(manifest_path, overrides)?;
    let output = Path::new(output);
    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    println!("Generating sources from: {manifest_path}");

    let mut sink = FileSink::new(output);
    let report = Processor::new(options).process(&manifest, &mut sink);

    for name in &report.written {
        println!("  {name}");
    }
    for diagnostic in report.diagnostics.iter() {
        eprintln!("{}: {diagnostic}", diagnostic.element);
    }
    let written = report.written.len();
    report.into_result()?;

    println!("\nGenerated {written} source file(s) in {}", output.display());
    Ok(())
}
