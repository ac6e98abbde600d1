use serde_json::Value;
use tracing::warn;

use crate::bank::{answer_is_true, Level, LevelCounts, NormalizedQuestion, QuestionBank, QuestionSet};
use crate::config::UnknownLevelPolicy;
use crate::error::FragmentError;

/// What normalizing one fragment did to the bank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub added: LevelCounts,
    /// Labels outside the level table, whatever the policy did with them.
    pub unknown_levels: usize,
    /// Questions dropped under [`UnknownLevelPolicy::Reject`].
    pub rejected: usize,
    /// Questions dropped because the statement was blank.
    pub blank: usize,
}

/// Read the question list out of a decoded fragment.
pub fn question_set(value: Value) -> Result<QuestionSet, FragmentError> {
    serde_json::from_value(value).map_err(|e| FragmentError::Schema(e.to_string()))
}

/// Normalize every question of `set` and append it to `bank` under `origin`.
pub fn normalize_into(
    set: QuestionSet,
    origin: &str,
    policy: UnknownLevelPolicy,
    bank: &mut QuestionBank,
) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for record in set.questions {
        let statement = record.statement.trim();
        if statement.is_empty() {
            warn!("'{}': skipping question with a blank statement", origin);
            report.blank += 1;
            continue;
        }

        let level = match Level::from_label(&record.level) {
            Some(level) => level,
            None => {
                report.unknown_levels += 1;
                match policy {
                    UnknownLevelPolicy::Basic => {
                        warn!("'{}': unknown level {:?}, using basic", origin, record.level);
                        Level::Basic
                    }
                    UnknownLevelPolicy::Reject => {
                        warn!("'{}': unknown level {:?}, question dropped", origin, record.level);
                        report.rejected += 1;
                        continue;
                    }
                }
            }
        };

        bank.push(
            level,
            NormalizedQuestion {
                statement: statement.to_string(),
                is_true: answer_is_true(&record.correct_answer),
                origin: origin.to_string(),
            },
        );
        report.added.add(level);
    }

    report
}
