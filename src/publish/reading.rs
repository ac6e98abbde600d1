use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

pub const UNTITLED: &str = "Sin título";
pub const UNKNOWN_AUTHOR: &str = "Desconocido";

/// A final reading text, ready to be paired with its questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// File stem; matched against question origins.
    pub name: String,
    pub title: String,
    pub author: String,
    pub text: String,
}

/// Title is the first line; author comes from an `Autor:` line near the top.
pub fn parse_reading(name: &str, contents: &str, author_scan_lines: usize) -> Reading {
    let text = contents.trim();

    let title = text
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();

    let author = text
        .lines()
        .take(author_scan_lines)
        .find_map(|line| line.trim().strip_prefix("Autor:"))
        .map(|author| author.trim().to_string())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    Reading {
        name: name.to_string(),
        title,
        author,
        text: text.to_string(),
    }
}

/// Load every `*.txt` directly under `dir`, sorted by file name.
pub fn load_readings(dir: &Path, author_scan_lines: usize) -> Result<Vec<Reading>> {
    if !dir.is_dir() {
        anyhow::bail!("Readings directory not found: {:?}", dir);
    }

    let mut readings = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("txt") {
            continue;
        }

        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(name) => name,
            None => {
                warn!("Skipping reading with a non UTF-8 name: {:?}", path);
                continue;
            }
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read reading: {:?}", path))?;
        readings.push(parse_reading(name, &contents, author_scan_lines));
    }

    info!("Loaded {} readings from {:?}", readings.len(), dir);
    Ok(readings)
}
