use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::bank::Level;

/// Fatal errors that abort a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read input blob {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("question store I/O failed for {path:?}: {source}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("question store {path:?} is not a valid bank: {source}")]
    StoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("question store {path:?} has an invalid {level} entry #{index}: {reason}")]
    StoreEntry {
        path: PathBuf,
        level: Level,
        index: usize,
        reason: &'static str,
    },

    #[error("failed to load config {path:?}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Why one decode tier could not produce a JSON value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TierError {
    #[error("not a JSON string literal: {0}")]
    NotStringLiteral(String),

    #[error("missing closing fence")]
    Unterminated,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

/// Both decode tiers failed for one fragment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("strict decode failed ({strict}); repaired decode failed ({repaired})")]
pub struct DecodeError {
    pub strict: TierError,
    pub repaired: TierError,
}

/// Why a single fragment contributed no records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("schema mismatch: {0}")]
    Schema(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    EmptyPath { field: &'static str },

    #[error("collection name must not be empty")]
    EmptyCollection,

    #[error("input and store must be different files: {0:?}")]
    InputIsStore(PathBuf),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
