//! Output sinks for generated sources

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Destination for generated compilation units
pub trait SourceSink {
    fn write_source(&mut self, namespace: &str, type_name: &str, contents: &str) -> io::Result<()>;
}

/// Writes one `.java` file per type under a package directory tree
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where a type lands, e.g. `root/com/example/Foo.java`
    pub fn path_for(&self, namespace: &str, type_name: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in namespace.split('.').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir.join(format!("{type_name}.java"))
    }
}

impl SourceSink for FileSink {
    fn write_source(&mut self, namespace: &str, type_name: &str, contents: &str) -> io::Result<()> {
        let path = self.path_for(namespace, type_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        tracing::debug!(path = %path.display(), "wrote generated source");
        Ok(())
    }
}

/// Keeps generated sources in memory, keyed by qualified type name
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    sources: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, qualified_name: &str) -> Option<&str> {
        self.sources.get(qualified_name).map(String::as_str)
    }

    /// Qualified names written so far, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceSink for MemorySink {
    fn write_source(&mut self, namespace: &str, type_name: &str, contents: &str) -> io::Result<()> {
        self.sources.insert(
            crate::naming::qualified(namespace, type_name),
            contents.to_string(),
        );
        Ok(())
    }
}
