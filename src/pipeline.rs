use std::fs;
use tracing::{debug, info, warn};

use crate::bank::{BankSession, LevelCounts, QuestionBank};
use crate::config::{PipelineConfig, UnknownLevelPolicy};
use crate::error::{FragmentError, PipelineError, Result};
use crate::fragment::{decode_fragment, extract_fragments, normalize_into, question_set, DecodePath};

/// A fragment that contributed no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFailure {
    pub name: String,
    pub error: FragmentError,
}

/// Outcome of one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fragments_found: usize,
    /// Fragments decoded and read as a question list.
    pub processed: usize,
    /// Of `processed`, how many needed the repair tier.
    pub repaired: usize,
    pub failures: Vec<FragmentFailure>,
    pub added: LevelCounts,
    pub unknown_levels: usize,
    pub rejected: usize,
    pub blank: usize,
    /// Bank size per level after the run, loaded questions included.
    pub totals: LevelCounts,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn log(&self) {
        info!("Normalization complete!");
        info!("Summary:");
        info!("  - Fragments found: {}", self.fragments_found);
        info!("  - Processed: {} ({} repaired)", self.processed, self.repaired);
        info!("  - Failed: {}", self.failed());
        for failure in &self.failures {
            info!("      {}: {}", failure.name, failure.error);
        }
        if self.unknown_levels > 0 {
            info!(
                "  - Unknown levels: {} ({} rejected)",
                self.unknown_levels, self.rejected
            );
        }
        info!("  - Added this run: {}", self.added.total());
        info!("  - Basic: {} questions", self.totals.basic);
        info!("  - Intermediate: {} questions", self.totals.intermediate);
        info!("  - Advanced: {} questions", self.totals.advanced);
    }
}

/// Extract, decode and normalize every fragment of `text` into `bank`.
///
/// A fragment that fails to decode or lacks a question list is recorded in
/// the summary and skipped; it never stops the remaining fragments.
pub fn process_blob(text: &str, bank: &mut QuestionBank, policy: UnknownLevelPolicy) -> RunSummary {
    let fragments = extract_fragments(text);
    let mut summary = RunSummary {
        fragments_found: fragments.len(),
        ..Default::default()
    };

    if fragments.is_empty() {
        warn!("No fenced JSON fragments found");
    }

    for (idx, fragment) in fragments.into_iter().enumerate() {
        debug!("Decoding {}/{}: {}", idx + 1, summary.fragments_found, fragment.name);

        let outcome = decode_fragment(&fragment.raw)
            .map_err(FragmentError::from)
            .and_then(|decoded| Ok((decoded.path, question_set(decoded.value)?)));

        match outcome {
            Ok((path, set)) => {
                let count = set.questions.len();
                let report = normalize_into(set, &fragment.name, policy, bank);

                summary.processed += 1;
                if path == DecodePath::Repaired {
                    summary.repaired += 1;
                }
                summary.added.basic += report.added.basic;
                summary.added.intermediate += report.added.intermediate;
                summary.added.advanced += report.added.advanced;
                summary.unknown_levels += report.unknown_levels;
                summary.rejected += report.rejected;
                summary.blank += report.blank;

                info!("Processed: {} ({} questions, {})", fragment.name, count, path);
            }
            Err(error) => {
                warn!("Failed to process '{}': {}", fragment.name, error);
                summary.failures.push(FragmentFailure {
                    name: fragment.name,
                    error,
                });
            }
        }
    }

    summary.totals = bank.counts();
    summary
}

/// Run one full pass: load the store, process the input blob, save once.
///
/// Only I/O on the input or the store is fatal; the store is left untouched
/// when anything before the save fails.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;
    info!("Starting normalization: {}", config);

    let mut session = BankSession::open(&config.store)?;

    let text = fs::read_to_string(&config.input).map_err(|source| PipelineError::Input {
        path: config.input.clone(),
        source,
    })?;
    info!("Loaded input blob {:?} ({} characters)", config.input, text.len());

    let summary = process_blob(&text, session.bank_mut(), config.unknown_level);
    session.commit()?;

    Ok(summary)
}
