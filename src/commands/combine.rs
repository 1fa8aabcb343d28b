use crate::qpdf::{FileRange, Pdf};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(pdf: &Pdf, inputs: &[String], output: &Path) -> Result<()> {
    let entries: Vec<FileRange> = inputs.iter().map(|spec| parse_input(spec)).collect();

    pdf.combine_ranges_from_files(&entries, output)
        .with_context(|| format!("Failed to combine into {}", output.display()))?;

    println!(
        "Combined {} input(s) into {}",
        entries.len(),
        output.display()
    );

    Ok(())
}

/// Split an input spec into path and optional range. Everything after the
/// last ':' is the range; a spec without one selects the whole document.
fn parse_input(spec: &str) -> FileRange {
    match spec.rsplit_once(':') {
        Some((path, range)) if !path.is_empty() && !range.is_empty() => {
            FileRange::pages(path, range)
        }
        _ => FileRange::whole(spec),
    }
}
