mod cli;
mod commands;
mod engine;
mod error;
mod page_range;
mod qpdf;
mod rotation;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use qpdf::Pdf;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let pdf = Pdf::new(cli.engine.clone());

    match cli.command {
        Commands::Check { path } => {
            if pdf.is_pdf(&path)? {
                println!("{}: OK", path.display());
            } else {
                anyhow::bail!("{}: not a PDF the engine can process", path.display());
            }
        }
        Commands::Pages { path } => {
            println!("{}", pdf.page_count(&path)?);
        }
        Commands::EngineVersion => {
            println!("{}", pdf.version()?);
        }
        Commands::Rotate {
            path,
            direction,
            range,
        } => {
            commands::rotate::run(&pdf, &path, direction, &range)?;
        }
        Commands::Trim { path, range } => {
            commands::trim::run(&pdf, &path, &range)?;
        }
        Commands::Copy {
            path,
            range,
            output,
        } => {
            commands::copy::run(&pdf, &path, &range, &output)?;
        }
        Commands::Remove { path, range } => {
            commands::remove::run(&pdf, &path, &range)?;
        }
        Commands::Combine { inputs, output } => {
            commands::combine::run(&pdf, &inputs, &output)?;
        }
        Commands::Stamp { path, stamp, pages } => {
            commands::stamp::run(&pdf, &path, &stamp, pages.as_deref())?;
        }
        Commands::Sizes { path, json } => {
            commands::sizes::run(&pdf, &path, json)?;
        }
    }

    Ok(())
}
