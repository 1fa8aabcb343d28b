use crate::rotation::Rotation;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qpr")]
#[command(about = "PDF maintenance tool backed by the qpdf engine")]
#[command(version)]
pub struct Cli {
    /// Engine binary to invoke
    #[arg(long, global = true, default_value = "qpdf")]
    pub engine: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that a file is a PDF the engine can process
    Check {
        /// PDF file to validate
        path: PathBuf,
    },

    /// Print the number of pages
    #[command(alias = "npages")]
    Pages {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Print the engine's major version
    EngineVersion,

    /// Rotate pages in place
    Rotate {
        /// PDF file to modify
        path: PathBuf,

        /// right, left, down, up, or a signed angle (90, -90, 180, -180)
        #[arg(allow_hyphen_values = true)]
        direction: Rotation,

        /// Page ranges (e.g. "1-5,10,15-end")
        range: String,
    },

    /// Keep only the given pages, in place
    Trim {
        /// PDF file to modify
        path: PathBuf,

        /// Page ranges to keep (e.g. "1-5,10")
        range: String,
    },

    /// Copy pages to a new file
    Copy {
        /// PDF file to copy from
        path: PathBuf,

        /// Page ranges to copy (e.g. "1-5,10,15-end")
        range: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Remove the given pages, in place
    Remove {
        /// PDF file to modify
        path: PathBuf,

        /// Page ranges to remove (e.g. "2,7-end")
        range: String,
    },

    /// Combine page selections from multiple files
    #[command(alias = "merge")]
    Combine {
        /// Inputs as "file.pdf" (whole document) or "file.pdf:1-5,8"
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Overlay a stamp document onto a PDF, in place
    Stamp {
        /// PDF file to stamp
        path: PathBuf,

        /// PDF whose pages are overlaid
        stamp: PathBuf,

        /// Target pages (e.g. "1,3-end"); omitted stamps every page
        #[arg(short, long)]
        pages: Option<String>,
    },

    /// Print per-page dimensions in inches
    Sizes {
        /// PDF file to inspect
        path: PathBuf,

        /// Emit JSON instead of one line per page
        #[arg(long)]
        json: bool,
    },
}
