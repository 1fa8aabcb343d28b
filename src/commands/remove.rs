use crate::qpdf::Pdf;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(pdf: &Pdf, path: &Path, range: &str) -> Result<()> {
    pdf.remove_pages(path, range)
        .with_context(|| format!("Failed to remove pages from {}", path.display()))?;

    println!("Removed pages {} from {}", range, path.display());

    Ok(())
}
