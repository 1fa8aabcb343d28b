use crate::qpdf::Pdf;
use crate::rotation::Rotation;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(pdf: &Pdf, path: &Path, direction: Rotation, range: &str) -> Result<()> {
    pdf.rotate(path, direction, range)
        .with_context(|| format!("Failed to rotate {}", path.display()))?;

    println!("Rotated pages {} of {}", range, path.display());

    Ok(())
}
