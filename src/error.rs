use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A page-range token that is neither an integer nor a `lo-hi` pair.
    #[error("invalid page range token: {0:?}")]
    RangeSyntax(String),

    /// The end-of-document sentinel needs a page count to expand against.
    #[error("cannot use \"end\" in a page range without a page count")]
    MissingPageCount,

    #[error("invalid rotation: {0:?} (expected right/left/down/up or 90/-90/180/-180)")]
    InvalidRotation(String),

    /// The engine ran but exited with a fatal status.
    #[error("engine exited with status {status}: {stderr}")]
    EngineFailed { status: i32, stderr: String },

    /// The engine process could not be started at all.
    #[error("could not invoke engine {}: {source}", .program.display())]
    EngineUnavailable {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Engine stdout did not contain what we were parsing for.
    #[error("unexpected engine output: {0}")]
    UnexpectedOutput(String),

    #[error("malformed engine JSON: {0}")]
    Json(#[from] serde_json::Error),
}
