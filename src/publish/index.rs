use serde::Serialize;
use std::collections::BTreeMap;

use crate::bank::QuestionBank;

/// A bank question as stored on a reading document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedQuestion {
    #[serde(rename = "afirmacion")]
    pub statement: String,
    #[serde(rename = "respuesta")]
    pub is_true: bool,
    /// Free-text label of the level (`fácil`, `intermedia`, `difícil`).
    #[serde(rename = "dificultad")]
    pub difficulty: &'static str,
}

/// Bank questions regrouped by origin.
#[derive(Debug, Clone, Default)]
pub struct OriginIndex {
    by_origin: BTreeMap<String, Vec<TaggedQuestion>>,
}

impl OriginIndex {
    pub fn from_bank(bank: &QuestionBank) -> Self {
        let mut by_origin: BTreeMap<String, Vec<TaggedQuestion>> = BTreeMap::new();
        for (level, question) in bank.iter() {
            by_origin
                .entry(question.origin.clone())
                .or_default()
                .push(TaggedQuestion {
                    statement: question.statement.clone(),
                    is_true: question.is_true,
                    difficulty: level.label(),
                });
        }
        Self { by_origin }
    }

    /// Exact origin first, then a case-insensitive match; empty if neither.
    pub fn lookup(&self, name: &str) -> &[TaggedQuestion] {
        if let Some(questions) = self.by_origin.get(name) {
            return questions;
        }
        let lowered = name.to_lowercase();
        self.by_origin
            .iter()
            .find(|(origin, _)| origin.to_lowercase() == lowered)
            .map(|(_, questions)| questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.by_origin.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_origin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_origin.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Level, NormalizedQuestion};

    fn bank() -> QuestionBank {
        let mut bank = QuestionBank::new();
        let q = |s: &str, o: &str| NormalizedQuestion {
            statement: s.to_string(),
            is_true: true,
            origin: o.to_string(),
        };
        bank.push(Level::Advanced, q("c", "El Zorro"));
        bank.push(Level::Basic, q("a", "El Zorro"));
        bank.push(Level::Intermediate, q("b", "La Luna"));
        bank
    }

    #[test]
    fn test_groups_with_inverse_labels() {
        let index = OriginIndex::from_bank(&bank());
        assert_eq!(index.len(), 2);

        let zorro = index.lookup("El Zorro");
        let tagged: Vec<_> = zorro.iter().map(|q| (q.statement.as_str(), q.difficulty)).collect();
        assert_eq!(tagged, vec![("a", "fácil"), ("c", "difícil")]);
        assert_eq!(index.lookup("La Luna")[0].difficulty, "intermedia");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let index = OriginIndex::from_bank(&bank());
        assert_eq!(index.lookup("el zorro").len(), 2);
        assert!(index.lookup("El Sol").is_empty());
    }

    #[test]
    fn test_serialized_names() {
        let index = OriginIndex::from_bank(&bank());
        let value = serde_json::to_value(&index.lookup("La Luna")[0]).unwrap();
        assert_eq!(value["afirmacion"], "b");
        assert_eq!(value["respuesta"], true);
        assert_eq!(value["dificultad"], "intermedia");
    }
}
