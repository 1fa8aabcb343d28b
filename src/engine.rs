use crate::error::{Error, Result};
use std::borrow::Cow;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// Runs the external document engine. The planner only ever builds argv
/// lists and hands them here; it never touches a shell or the filesystem.
pub trait EngineRunner {
    fn run(&self, args: &[OsString]) -> Result<EngineOutput>;
}

/// Captured result of one engine invocation.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// qpdf exit statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// No errors or warnings.
    Success,
    /// Not used by qpdf itself; the shell reports it when it cannot invoke
    /// the engine.
    NonInvokable,
    /// Errors detected.
    Error,
    /// Warnings detected (unless --warning-exit-0 is given).
    Warning,
}

impl ExitCode {
    pub fn from_status(status: i32) -> Option<Self> {
        match status {
            0 => Some(ExitCode::Success),
            1 => Some(ExitCode::NonInvokable),
            2 => Some(ExitCode::Error),
            3 => Some(ExitCode::Warning),
            _ => None,
        }
    }

    /// Many PDFs are not completely valid but can still be processed, so a
    /// warning exit is treated as success.
    pub fn is_soft_success(self) -> bool {
        matches!(self, ExitCode::Success | ExitCode::Warning)
    }
}

impl EngineOutput {
    pub fn classify(&self) -> Option<ExitCode> {
        ExitCode::from_status(self.status)
    }

    pub fn soft_success(&self) -> bool {
        matches!(self.classify(), Some(code) if code.is_soft_success())
    }

    /// Turn a fatal exit status into an error carrying the engine's
    /// diagnostics. For in-place operations the target file's state is
    /// undefined after this fails.
    pub fn checked(self) -> Result<Self> {
        if self.soft_success() {
            Ok(self)
        } else {
            Err(Error::EngineFailed {
                status: self.status,
                stderr: String::from_utf8_lossy(&self.stderr).trim().to_string(),
            })
        }
    }

    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }
}

/// Invokes a configured engine binary as a subprocess.
pub struct SystemEngine {
    program: PathBuf,
}

impl SystemEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        SystemEngine {
            program: program.into(),
        }
    }
}

impl EngineRunner for SystemEngine {
    fn run(&self, args: &[OsString]) -> Result<EngineOutput> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| Error::EngineUnavailable {
                program: self.program.clone(),
                source,
            })?;

        Ok(EngineOutput {
            // A signal death has no code; fold it into a fatal status.
            status: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
