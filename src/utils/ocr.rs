use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Check whether `ocrmypdf` is on PATH
pub fn ocrmypdf_available() -> bool {
    Command::new("ocrmypdf")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn ocr_args(input: &Path, output: &Path, language: &str) -> Vec<std::ffi::OsString> {
    vec![
        "--language".into(),
        language.into(),
        "--force-ocr".into(),
        input.as_os_str().to_os_string(),
        output.as_os_str().to_os_string(),
    ]
}

/// Add a searchable text layer to a scanned PDF using OCRmyPDF (external tool)
///
/// Note: This requires OCRmyPDF and Tesseract language data to be installed.
/// - Linux: sudo apt-get install ocrmypdf tesseract-ocr-spa
/// - Mac: brew install ocrmypdf tesseract-lang
pub fn ocr_pdf(input: &Path, output: &Path, language: &str) -> Result<()> {
    info!("Performing OCR on PDF: {:?} ({})", input, language);

    if !ocrmypdf_available() {
        anyhow::bail!(
            "OCRmyPDF is not installed or not in PATH. \
             Please install it: https://ocrmypdf.readthedocs.io/"
        );
    }

    let out = Command::new("ocrmypdf")
        .args(ocr_args(input, output, language))
        .output()
        .with_context(|| format!("Failed to run ocrmypdf on {:?}", input))?;

    if !out.status.success() {
        anyhow::bail!(
            "ocrmypdf failed for {:?} ({}): {}",
            input,
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        );
    }

    info!("OCR completed: {:?}", output);
    Ok(())
}
