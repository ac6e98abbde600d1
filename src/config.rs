use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, PipelineError};

/// What to do with a question whose level label is not in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLevelPolicy {
    /// Bucket the question as `basic` and log a warning.
    #[default]
    Basic,
    /// Drop the question and log a warning.
    Reject,
}

impl fmt::Display for UnknownLevelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Directory holding the final `*.txt` readings.
    pub readings_dir: PathBuf,
    pub collection: String,
    /// Root of the JSON-directory document store.
    pub export_dir: PathBuf,
    /// How many leading lines are scanned for an `Autor:` line.
    pub author_scan_lines: usize,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            readings_dir: PathBuf::from("lecturas_finales"),
            collection: "lecturas".to_string(),
            export_dir: PathBuf::from("firestore_export"),
            author_scan_lines: 5,
        }
    }
}

impl PublishConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.readings_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { field: "readings_dir" });
        }
        if self.export_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { field: "export_dir" });
        }
        if self.collection.trim().is_empty() {
            return Err(ConfigError::EmptyCollection);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Text blob holding the model's fenced JSON fragments.
    pub input: PathBuf,
    /// Persisted question bank, merged into and overwritten by each run.
    pub store: PathBuf,
    pub unknown_level: UnknownLevelPolicy,
    pub publish: PublishConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("banco_ia_analiza.txt"),
            store: PathBuf::from("banco_verdadero_falso.json"),
            unknown_level: UnknownLevelPolicy::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a config file; every missing field takes its default.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path).map_err(|e| PipelineError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| PipelineError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { field: "input" });
        }
        if self.store.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { field: "store" });
        }
        if self.input == self.store {
            return Err(ConfigError::InputIsStore(self.store.clone()));
        }
        self.publish.validate()
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input={:?} store={:?} unknown_level={}",
            self.input, self.store, self.unknown_level
        )
    }
}
