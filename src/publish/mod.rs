//! Pair final readings with their bank questions and push them to a
//! document store, one document per reading.

mod index;
mod reading;
mod store;

pub use index::{OriginIndex, TaggedQuestion};
pub use reading::{load_readings, parse_reading, Reading, UNKNOWN_AUTHOR, UNTITLED};
pub use store::{DocumentStore, JsonDirStore};

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// The document stored for each reading, keyed by its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingDocument {
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "preguntas_vof")]
    pub questions: Vec<TaggedQuestion>,
}

impl ReadingDocument {
    pub fn build(reading: &Reading, index: &OriginIndex) -> Self {
        Self {
            text: reading.text.clone(),
            author: reading.author.clone(),
            questions: index.lookup(&reading.name).to_vec(),
        }
    }
}

/// How one reading will look once published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingPreview {
    pub name: String,
    pub title: String,
    pub author: String,
    pub characters: usize,
    pub questions: usize,
    /// Question count per free-text difficulty label.
    pub by_difficulty: BTreeMap<&'static str, usize>,
}

pub fn preview(readings: &[Reading], index: &OriginIndex) -> Vec<ReadingPreview> {
    readings
        .iter()
        .map(|reading| {
            let questions = index.lookup(&reading.name);
            let mut by_difficulty = BTreeMap::new();
            for q in questions {
                *by_difficulty.entry(q.difficulty).or_insert(0) += 1;
            }

            if questions.is_empty() {
                warn!("'{}': no questions found", reading.name);
                warn!(
                    "   Available origins: {:?}",
                    index.origins().collect::<Vec<_>>()
                );
            }

            ReadingPreview {
                name: reading.name.clone(),
                title: reading.title.clone(),
                author: reading.author.clone(),
                characters: reading.text.chars().count(),
                questions: questions.len(),
                by_difficulty,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub uploaded: usize,
    pub failed: usize,
}

/// Put one [`ReadingDocument`] per reading into `store`.
///
/// A failed put is logged and counted; the remaining readings still go out.
pub fn publish<S: DocumentStore + ?Sized>(
    readings: &[Reading],
    index: &OriginIndex,
    store: &mut S,
    collection: &str,
) -> PublishSummary {
    let mut summary = PublishSummary::default();

    for reading in readings {
        let document = ReadingDocument::build(reading, index);
        if document.questions.is_empty() {
            warn!("'{}': no questions found", reading.name);
        }

        let result = serde_json::to_value(&document)
            .map_err(anyhow::Error::from)
            .and_then(|value| store.put(collection, &reading.title, &value));

        match result {
            Ok(()) => {
                info!(
                    "'{}' uploaded ({} questions)",
                    reading.title,
                    document.questions.len()
                );
                summary.uploaded += 1;
            }
            Err(e) => {
                warn!("Failed to upload '{}': {:#}", reading.name, e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Uploaded {} readings, {} failed",
        summary.uploaded, summary.failed
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Level, NormalizedQuestion, QuestionBank};
    use serde_json::Value;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        docs: HashMap<(String, String), Value>,
        fail_on: Option<String>,
    }

    impl DocumentStore for MemoryStore {
        fn put(&mut self, collection: &str, id: &str, document: &Value) -> anyhow::Result<()> {
            if self.fail_on.as_deref() == Some(id) {
                anyhow::bail!("store rejected {id}");
            }
            self.docs
                .insert((collection.to_string(), id.to_string()), document.clone());
            Ok(())
        }
    }

    fn fixtures() -> (Vec<Reading>, OriginIndex) {
        let mut bank = QuestionBank::new();
        bank.push(
            Level::Basic,
            NormalizedQuestion {
                statement: "El zorro quería uvas".to_string(),
                is_true: true,
                origin: "El zorro".to_string(),
            },
        );
        bank.push(
            Level::Advanced,
            NormalizedQuestion {
                statement: "El zorro alcanzó las uvas".to_string(),
                is_true: false,
                origin: "El zorro".to_string(),
            },
        );
        let readings = vec![
            parse_reading("el zorro", "El zorro y la uva\nAutor: Esopo\nTexto", 5),
            parse_reading("La Luna", "La Luna\nTexto", 5),
        ];
        (readings, OriginIndex::from_bank(&bank))
    }

    #[test]
    fn test_preview_counts() {
        let (readings, index) = fixtures();
        let previews = preview(&readings, &index);

        assert_eq!(previews[0].questions, 2);
        assert_eq!(previews[0].author, "Esopo");
        assert_eq!(previews[0].by_difficulty.get("fácil"), Some(&1));
        assert_eq!(previews[0].by_difficulty.get("difícil"), Some(&1));
        assert_eq!(previews[1].questions, 0);
        assert_eq!(previews[1].author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_publish_documents_keyed_by_title() {
        let (readings, index) = fixtures();
        let mut store = MemoryStore::default();

        let summary = publish(&readings, &index, &mut store, "lecturas");
        assert_eq!(summary, PublishSummary { uploaded: 2, failed: 0 });

        let doc = &store.docs[&("lecturas".to_string(), "El zorro y la uva".to_string())];
        assert_eq!(doc["autor"], "Esopo");
        assert_eq!(doc["preguntas_vof"].as_array().unwrap().len(), 2);
        assert_eq!(doc["preguntas_vof"][1]["dificultad"], "difícil");
        assert_eq!(doc["preguntas_vof"][1]["respuesta"], false);

        let luna = &store.docs[&("lecturas".to_string(), "La Luna".to_string())];
        assert!(luna["preguntas_vof"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_publish_continues_after_failure() {
        let (readings, index) = fixtures();
        let mut store = MemoryStore {
            fail_on: Some("El zorro y la uva".to_string()),
            ..Default::default()
        };

        let summary = publish(&readings, &index, &mut store, "lecturas");
        assert_eq!(summary, PublishSummary { uploaded: 1, failed: 1 });
        assert_eq!(store.docs.len(), 1);
    }
}
