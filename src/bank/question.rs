use serde::{Deserialize, Serialize};

/// One question as the model wrote it, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    #[serde(alias = "nivel")]
    pub level: String,
    #[serde(alias = "pregunta")]
    pub statement: String,
    #[serde(alias = "respuesta_correcta", alias = "correctAnswer")]
    pub correct_answer: String,
}

/// The payload of one decoded fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionSet {
    #[serde(alias = "preguntas")]
    pub questions: Vec<QuestionRecord>,
}

/// A bank entry. Persisted with the field names the uploader reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedQuestion {
    #[serde(rename = "afirmacion", alias = "statement")]
    pub statement: String,
    #[serde(rename = "respuesta", alias = "isTrue")]
    pub is_true: bool,
    #[serde(rename = "origen", alias = "origin")]
    pub origin: String,
}

/// `true` only for "verdadero" or "true", ignoring case and surrounding space.
pub fn answer_is_true(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("verdadero") || answer.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_coercion() {
        for yes in ["Verdadero", "verdadero", "true", "TRUE", " VERDADERO "] {
            assert!(answer_is_true(yes), "{yes:?}");
        }
        for no in ["Falso", "no", "", "false", "verdad", "sí"] {
            assert!(!answer_is_true(no), "{no:?}");
        }
    }

    #[test]
    fn test_record_accepts_spanish_and_english_fields() {
        let es: QuestionRecord = serde_json::from_str(
            r#"{"nivel":"fácil","pregunta":"El sol es amarillo","respuesta_correcta":"Verdadero"}"#,
        )
        .unwrap();
        let en: QuestionRecord = serde_json::from_str(
            r#"{"level":"fácil","statement":"El sol es amarillo","correctAnswer":"Verdadero"}"#,
        )
        .unwrap();
        assert_eq!(es, en);
    }

    #[test]
    fn test_set_requires_question_list() {
        assert!(serde_json::from_str::<QuestionSet>(r#"{"preguntas": []}"#).is_ok());
        assert!(serde_json::from_str::<QuestionSet>(r#"{"questions": []}"#).is_ok());
        assert!(serde_json::from_str::<QuestionSet>(r#"{"lectura": "x"}"#).is_err());
    }

    #[test]
    fn test_normalized_field_names() {
        let q = NormalizedQuestion {
            statement: "El río corre".to_string(),
            is_true: false,
            origin: "Cuento A".to_string(),
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["afirmacion"], "El río corre");
        assert_eq!(value["respuesta"], false);
        assert_eq!(value["origen"], "Cuento A");

        let english: NormalizedQuestion = serde_json::from_str(
            r#"{"statement":"El río corre","isTrue":false,"origin":"Cuento A"}"#,
        )
        .unwrap();
        assert_eq!(english, q);
    }
}
