use anyhow::{Context, Result};
use pdf_extract::extract_text;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::text_processor::clean_page_text;

/// Structured content from PDF
#[derive(Debug, Clone)]
pub struct PdfContent {
    pub text: String,
    pub pages: Vec<String>,
    pub has_text: bool,
}

/// Extract text from a PDF file
pub fn extract_text_from_pdf(path: &Path) -> Result<PdfContent> {
    info!("Extracting text from PDF: {:?}", path);

    let text = extract_text(path)
        .with_context(|| format!("Failed to extract text from PDF: {:?}", path))?;

    let has_text = !text.trim().is_empty();

    if !has_text {
        warn!("PDF appears to be scanned or has no extractable text: {:?}", path);
    }

    // Pages are separated by form feeds
    let pages: Vec<String> = text.split('\x0C').map(|s| s.to_string()).collect();

    info!("Extracted {} pages from PDF", pages.len());

    Ok(PdfContent {
        text,
        pages,
        has_text,
    })
}

/// One row of the readings table: a reading name and its pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadingRange {
    pub lectura: String,
    /// `"5-12"` or a single page `"7"`, 1-based and inclusive.
    pub paginas: String,
}

/// Parse `"a-b"` or `"a"` into an inclusive 1-based page range.
pub fn parse_page_range(pages: &str) -> Result<(usize, usize)> {
    let pages = pages.trim();
    let (start, end) = match pages.split_once('-') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (pages, pages),
    };

    let start: usize = start
        .parse()
        .with_context(|| format!("Invalid start page in {:?}", pages))?;
    let end: usize = end
        .parse()
        .with_context(|| format!("Invalid end page in {:?}", pages))?;

    if start == 0 || end < start {
        anyhow::bail!("Invalid page range {:?}", pages);
    }
    Ok((start, end))
}

/// Load the readings table (a JSON array of `{lectura, paginas}`).
pub fn load_reading_ranges(path: &Path) -> Result<Vec<ReadingRange>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read readings table: {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse readings table: {:?}", path))
}

/// Write one `<lectura>.txt` per range from the given page texts.
pub fn split_readings(pages: &[String], ranges: &[ReadingRange], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let mut written = Vec::with_capacity(ranges.len());

    for range in ranges {
        let (start, end) = parse_page_range(&range.paginas)
            .with_context(|| format!("Reading {:?}", range.lectura))?;

        let mut sections = Vec::new();
        for page in start..=end {
            match pages.get(page - 1) {
                Some(text) => {
                    let cleaned = clean_page_text(text);
                    if !cleaned.is_empty() {
                        sections.push(cleaned);
                    }
                }
                None => warn!("Page {} is outside the document ({} pages)", page, pages.len()),
            }
        }

        let out_path = out_dir.join(format!("{}.txt", range.lectura));
        fs::write(&out_path, sections.join("\n\n"))
            .with_context(|| format!("Failed to write reading: {:?}", out_path))?;

        info!("Saved {:?} (pages {}-{})", out_path, start, end);
        written.push(out_path);
    }

    Ok(written)
}
