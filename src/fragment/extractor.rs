use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// A name-keyed fragment still in its escaped, fence-wrapped form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment {
    pub name: String,
    pub raw: String,
}

fn fragment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The value is a whole JSON string literal opening with a json fence;
    // it ends at the first unescaped quote, closing fence or not.
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?s)"([^"]+)":\s*"(```json(?:[^"\\]|\\.)*)""#).expect("fragment pattern is valid")
    })
}

/// Find every `"name": "```json ... ```"` field in `text`, in source order.
///
/// Repeated names are returned once per occurrence. A missing closing fence
/// is left for the decoder to report; fields with a blank name are skipped.
pub fn extract_fragments(text: &str) -> Vec<RawFragment> {
    let fragments: Vec<RawFragment> = fragment_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let name = &caps[1];
            if name.trim().is_empty() {
                warn!("Skipping fenced fragment with a blank name");
                return None;
            }
            Some(RawFragment {
                name: name.to_string(),
                raw: caps[2].to_string(),
            })
        })
        .collect();

    debug!("Extracted {} fragments from {} bytes", fragments.len(), text.len());
    fragments
}
