use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reading_quiz::utils::{extract_text_from_pdf, load_reading_ranges, ocr_pdf, split_readings};

#[derive(Debug, Parser)]
#[command(author, version, about = "Split a scanned book PDF into one text file per reading")]
struct Args {
    /// Input book PDF
    #[arg(short, long)]
    input: PathBuf,

    /// JSON table of readings: [{"lectura": "...", "paginas": "5-12"}]
    #[arg(short, long)]
    ranges: PathBuf,

    /// Output directory for reading .txt files
    #[arg(short, long, default_value = "lecturas_txt")]
    output: PathBuf,

    /// Run OCRmyPDF on the input first
    #[arg(long, default_value = "false")]
    enable_ocr: bool,

    /// OCR language
    #[arg(long, default_value = "spa")]
    language: String,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Starting reading preparation");
    info!("Input PDF: {:?}", args.input);
    info!("Output directory: {:?}", args.output);

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output directory: {:?}", args.output))?;

    let pdf_path = if args.enable_ocr {
        let stem = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("libro");
        let ocr_path = args.output.join(format!("{}_ocr.pdf", stem));
        ocr_pdf(&args.input, &ocr_path, &args.language)?;
        ocr_path
    } else {
        args.input.clone()
    };

    let content = extract_text_from_pdf(&pdf_path)?;
    if !content.has_text {
        anyhow::bail!("PDF has no extractable text (enable OCR with --enable-ocr)");
    }

    let ranges = load_reading_ranges(&args.ranges)?;
    info!("Found {} readings in {:?}", ranges.len(), args.ranges);

    let written = split_readings(&content.pages, &ranges, &args.output)?;

    info!("Preparation complete!");
    info!("Summary:");
    info!("  - Pages: {}", content.pages.len());
    info!("  - Readings written: {}", written.len());

    Ok(())
}
