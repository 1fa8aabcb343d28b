use crate::qpdf::Pdf;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(pdf: &Pdf, path: &Path, range: &str, output: &Path) -> Result<()> {
    pdf.copy_pages(path, output, range)
        .with_context(|| format!("Failed to copy pages from {}", path.display()))?;

    println!(
        "Copied pages {} of {} to {}",
        range,
        path.display(),
        output.display()
    );

    Ok(())
}
