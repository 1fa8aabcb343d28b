use crate::qpdf::Pdf;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(pdf: &Pdf, path: &Path, json: bool) -> Result<()> {
    let sizes = pdf
        .page_sizes(path)
        .with_context(|| format!("Failed to read page sizes of {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string(&sizes)?);
        return Ok(());
    }

    for (index, size) in sizes.iter().enumerate() {
        match size {
            Some(size) => println!("page {}: {} x {} in", index + 1, size.width, size.height),
            None => println!("page {}: no MediaBox", index + 1),
        }
    }

    Ok(())
}
