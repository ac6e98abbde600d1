use regex::Regex;
use std::sync::OnceLock;

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern is valid"))
}

/// Clean OCR'd page text while keeping line and paragraph breaks
pub fn clean_page_text(text: &str) -> String {
    static SPACES: OnceLock<Regex> = OnceLock::new();
    static PAGE_NUMS: OnceLock<Regex> = OnceLock::new();
    static NEWLINES: OnceLock<Regex> = OnceLock::new();

    // Collapse runs of spaces/tabs, not newlines
    let text = text.replace("\r\n", "\n");
    let text = cached(&SPACES, r"[ \t]+").replace_all(&text, " ");

    // Remove page numbers (heuristic: standalone numbers)
    let text = cached(&PAGE_NUMS, r"(?m)^ ?\d{1,4} ?$").replace_all(&text, "");

    // Keep paragraph breaks only
    let text = cached(&NEWLINES, r"\n{3,}").replace_all(&text, "\n\n");

    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
