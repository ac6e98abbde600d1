use serde_json::Value;
use std::fmt;

use crate::error::{DecodeError, TierError};

/// Which tier produced the JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePath {
    /// The fragment was a well-formed JSON string literal.
    Strict,
    /// Recovered by textual substitution of escapes and fences.
    Repaired,
}

impl fmt::Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Repaired => write!(f, "repaired"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub path: DecodePath,
    pub value: Value,
}

/// Remove the ```` ```json ```` / ```` ``` ```` markers from unescaped text.
fn strip_fences(text: &str) -> String {
    text.replace("```json\n", "")
        .replace("\n```", "")
        .replace("```json", "")
        .replace("```", "")
}

fn has_closing_fence(text: &str) -> bool {
    text.trim_end().ends_with("```")
}

fn parse_body(text: &str) -> Result<Value, TierError> {
    serde_json::from_str(strip_fences(text).trim()).map_err(|e| TierError::InvalidJson(e.to_string()))
}

/// Unescape `raw` as the body of a JSON string literal, then parse the
/// fenced JSON it contains.
pub fn decode_strict(raw: &str) -> Result<Value, TierError> {
    let unescaped: String = serde_json::from_str(&format!("\"{raw}\""))
        .map_err(|e| TierError::NotStringLiteral(e.to_string()))?;
    if !has_closing_fence(&unescaped) {
        return Err(TierError::Unterminated);
    }
    parse_body(&unescaped)
}

/// Substitute literal `\n` and `\"` sequences and drop the fences directly
/// on `raw`, then parse.
pub fn decode_repaired(raw: &str) -> Result<Value, TierError> {
    if !has_closing_fence(raw) {
        return Err(TierError::Unterminated);
    }
    let substituted = raw
        .replace("```json\\n", "")
        .replace("\\n```", "")
        .replace("\\n", "\n")
        .replace("\\\"", "\"");
    parse_body(&substituted)
}

/// Two-tier decode: strict first, repaired only if strict fails.
pub fn decode_fragment(raw: &str) -> Result<Decoded, DecodeError> {
    let strict = match decode_strict(raw) {
        Ok(value) => {
            return Ok(Decoded {
                path: DecodePath::Strict,
                value,
            })
        }
        Err(e) => e,
    };

    match decode_repaired(raw) {
        Ok(value) => Ok(Decoded {
            path: DecodePath::Repaired,
            value,
        }),
        Err(repaired) => Err(DecodeError { strict, repaired }),
    }
}
