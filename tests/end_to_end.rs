//! End-to-end runs of the normalization pass over temp-directory fixtures.

use reading_quiz::{run, FragmentError, PipelineConfig, QuestionBank};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        input: dir.join("banco_ia_analiza.txt"),
        store: dir.join("banco_verdadero_falso.json"),
        ..Default::default()
    }
}

fn cuento_a(answer: &str) -> String {
    format!(
        r#"{{
  "Cuento A": "```json\n{{\"preguntas\":[{{\"nivel\":\"fácil\",\"pregunta\":\"El sol es amarillo\",\"respuesta_correcta\":\"{answer}\"}}]}}\n```"
}}"#
    )
}

#[test]
fn test_true_answer_lands_in_basic() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    fs::write(&config.input, cuento_a("Verdadero")).unwrap();

    let summary = run(&config).unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed(), 0);

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.store).unwrap()).unwrap();
    assert_eq!(
        stored,
        json!({
            "basic": [{"afirmacion": "El sol es amarillo", "respuesta": true, "origen": "Cuento A"}],
            "intermediate": [],
            "advanced": []
        })
    );
}

#[test]
fn test_false_answer_is_false() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    fs::write(&config.input, cuento_a("Falso")).unwrap();

    run(&config).unwrap();

    let bank = QuestionBank::load(&config.store).unwrap();
    assert_eq!(bank.basic.len(), 1);
    assert!(!bank.basic[0].is_true);
}

#[test]
fn test_malformed_fragment_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    // The fence never closes.
    fs::write(
        &config.input,
        r#"{"Cuento B": "```json\n{\"preguntas\":[{\"nivel\":\"fácil\",\"pregunta\":\"X\",\"respuesta_correcta\":\"true\"}]}"}"#,
    )
    .unwrap();

    let summary = run(&config).unwrap();
    assert_eq!(summary.fragments_found, 1);
    assert_eq!(summary.processed, 0);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.failures[0].name, "Cuento B");
    assert!(matches!(summary.failures[0].error, FragmentError::Decode(_)));

    let bank = QuestionBank::load(&config.store).unwrap();
    assert!(bank.is_empty());
}

#[test]
fn test_cut_off_body_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    fs::write(
        &config.input,
        r#"{"Cuento B": "```json\n{\"preguntas\":[{\"nivel\":\"fácil\",\n```", "Cuento A": "```json\n{\"preguntas\":[]}\n```"}"#,
    )
    .unwrap();

    let summary = run(&config).unwrap();
    assert_eq!(summary.fragments_found, 2);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.failures[0].name, "Cuento B");
}

#[test]
fn test_rerun_without_reset_doubles_origin() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    fs::write(&config.input, cuento_a("true")).unwrap();

    let first = run(&config).unwrap();
    let second = run(&config).unwrap();

    assert_eq!(first.totals.total(), 1);
    assert_eq!(second.totals.total(), 2);
    assert_eq!(QuestionBank::load(&config.store).unwrap().count_origin("Cuento A"), 2);
}
