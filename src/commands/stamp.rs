use crate::qpdf::Pdf;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(pdf: &Pdf, path: &Path, stamp: &Path, pages: Option<&str>) -> Result<()> {
    pdf.apply_stamp(path, stamp, pages)
        .with_context(|| format!("Failed to stamp {}", path.display()))?;

    match pages {
        Some(pages) => println!("Stamped pages {} of {}", pages, path.display()),
        None => println!("Stamped every page of {}", path.display()),
    }

    Ok(())
}
