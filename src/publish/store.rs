use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Narrow interface to a document database: one JSON document per id.
pub trait DocumentStore {
    fn put(&mut self, collection: &str, id: &str, document: &Value) -> Result<()>;
}

/// Stores each document as `<root>/<collection>/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, collection: &str, id: &str) -> PathBuf {
        self.root
            .join(file_safe(collection))
            .join(format!("{}.json", file_safe(id)))
    }
}

/// Document ids are titles; keep them from escaping the collection dir.
fn file_safe(id: &str) -> String {
    let safe: String = id
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    match safe.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => safe,
    }
}

impl DocumentStore for JsonDirStore {
    fn put(&mut self, collection: &str, id: &str, document: &Value) -> Result<()> {
        let path = self.document_path(collection, id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create collection directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(document)
            .with_context(|| format!("Failed to serialize document {:?}", id))?;
        fs::write(&path, json).with_context(|| format!("Failed to write document: {:?}", path))?;

        debug!("Stored {}/{} at {:?}", collection, id, path);
        Ok(())
    }
}
