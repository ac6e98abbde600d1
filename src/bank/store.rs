use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::level::Level;
use super::question::NormalizedQuestion;
use crate::error::{PipelineError, Result};

/// Questions bucketed by canonical level, in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionBank {
    #[serde(default, alias = "basico")]
    pub basic: Vec<NormalizedQuestion>,
    #[serde(default, alias = "intermedio")]
    pub intermediate: Vec<NormalizedQuestion>,
    #[serde(default, alias = "avanzado")]
    pub advanced: Vec<NormalizedQuestion>,
}

/// Per-level record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub basic: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl LevelCounts {
    pub fn add(&mut self, level: Level) {
        match level {
            Level::Basic => self.basic += 1,
            Level::Intermediate => self.intermediate += 1,
            Level::Advanced => self.advanced += 1,
        }
    }

    pub fn get(&self, level: Level) -> usize {
        match level {
            Level::Basic => self.basic,
            Level::Intermediate => self.intermediate,
            Level::Advanced => self.advanced,
        }
    }

    pub fn total(&self) -> usize {
        self.basic + self.intermediate + self.advanced
    }
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self, level: Level) -> &[NormalizedQuestion] {
        match level {
            Level::Basic => &self.basic,
            Level::Intermediate => &self.intermediate,
            Level::Advanced => &self.advanced,
        }
    }

    pub fn push(&mut self, level: Level, question: NormalizedQuestion) {
        let bucket = match level {
            Level::Basic => &mut self.basic,
            Level::Intermediate => &mut self.intermediate,
            Level::Advanced => &mut self.advanced,
        };
        bucket.push(question);
    }

    /// Iterate every question with its level, `basic` first.
    pub fn iter(&self) -> impl Iterator<Item = (Level, &NormalizedQuestion)> {
        Level::ALL
            .into_iter()
            .flat_map(move |level| self.questions(level).iter().map(move |q| (level, q)))
    }

    pub fn counts(&self) -> LevelCounts {
        LevelCounts {
            basic: self.basic.len(),
            intermediate: self.intermediate.len(),
            advanced: self.advanced.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.counts().total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_origin(&self, origin: &str) -> usize {
        self.iter().filter(|(_, q)| q.origin == origin).count()
    }

    /// Every entry must carry a non-blank statement and origin.
    fn check_entries(&self, path: &Path) -> Result<()> {
        for level in Level::ALL {
            for (index, q) in self.questions(level).iter().enumerate() {
                let reason = if q.statement.trim().is_empty() {
                    "blank statement"
                } else if q.origin.trim().is_empty() {
                    "blank origin"
                } else {
                    continue;
                };
                return Err(PipelineError::StoreEntry {
                    path: path.to_path_buf(),
                    level,
                    index,
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Load a persisted bank; a missing file yields an empty bank.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No question store at {:?}, starting empty", path);
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(PipelineError::StoreIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let bank: Self = serde_json::from_str(&raw).map_err(|source| PipelineError::StoreFormat {
            path: path.to_path_buf(),
            source,
        })?;
        bank.check_entries(path)?;

        info!("Loaded question store {:?} ({} questions)", path, bank.len());
        Ok(bank)
    }

    /// Overwrite `path` with the whole bank.
    ///
    /// The bank is written to a sibling temporary file and renamed into place,
    /// so readers never observe a half-written store.
    pub fn save(&self, path: &Path) -> Result<()> {
        let store_err = |source: io::Error| PipelineError::StoreIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(store_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| PipelineError::StoreFormat {
            path: path.to_path_buf(),
            source,
        })?;

        let tmp = temp_sibling(path);
        fs::write(&tmp, json).map_err(store_err)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(store_err(e));
        }

        debug!("Wrote {} questions to {:?}", self.len(), path);
        Ok(())
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("store"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// `load → mutate → save` over one store file.
///
/// The bank is saved only by [`BankSession::commit`], which consumes the
/// session; dropping an uncommitted session leaves the file untouched.
#[derive(Debug)]
pub struct BankSession {
    path: PathBuf,
    bank: QuestionBank,
    loaded: usize,
    committed: bool,
}

impl BankSession {
    pub fn open(path: &Path) -> Result<Self> {
        let bank = QuestionBank::load(path)?;
        let loaded = bank.len();
        Ok(Self {
            path: path.to_path_buf(),
            bank,
            loaded,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut QuestionBank {
        &mut self.bank
    }

    /// Number of questions present when the session was opened.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn commit(mut self) -> Result<QuestionBank> {
        self.bank.save(&self.path)?;
        self.committed = true;
        info!(
            "Saved question store {:?} ({} questions, {} new)",
            self.path,
            self.bank.len(),
            self.bank.len().saturating_sub(self.loaded)
        );
        Ok(std::mem::take(&mut self.bank))
    }
}

impl Drop for BankSession {
    fn drop(&mut self) {
        if !self.committed && self.bank.len() != self.loaded {
            warn!(
                "Discarding {} uncommitted questions for {:?}",
                self.bank.len().saturating_sub(self.loaded),
                self.path
            );
        }
    }
}
