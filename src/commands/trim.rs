use crate::qpdf::Pdf;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(pdf: &Pdf, path: &Path, range: &str) -> Result<()> {
    pdf.trim_to_range(path, range)
        .with_context(|| format!("Failed to trim {}", path.display()))?;

    println!("Kept pages {} of {}", range, path.display());

    Ok(())
}
