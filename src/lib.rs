// Library exports for use in scripts and other binaries

pub mod bank;
pub mod config;
pub mod error;
pub mod fragment;
pub mod pipeline;
pub mod publish;
pub mod utils;

// Re-export commonly used types
pub use bank::{BankSession, Level, NormalizedQuestion, QuestionBank};
pub use config::{PipelineConfig, UnknownLevelPolicy};
pub use error::{DecodeError, FragmentError, PipelineError, TierError};
pub use pipeline::{process_blob, run, FragmentFailure, RunSummary};
