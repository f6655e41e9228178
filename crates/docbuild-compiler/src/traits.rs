//! Trait definitions for document compilers.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitStatus;

/// One compile request: a Markdown source and the file to generate from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileJob {
    /// File name inside the source directory (e.g., "intro.md")
    pub source_name: String,

    /// Input path passed to the compiler (e.g., "./source/intro.md")
    pub input: PathBuf,

    /// Output path passed to the compiler (e.g., "./intro.generated.md")
    pub output: PathBuf,

    /// Directory the compiler runs in; `input` and `output` are relative to it
    pub working_dir: PathBuf,
}

/// How a compiler run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStatus {
    /// The compiler exited successfully
    Success,

    /// The compiler exited with a non-zero code, or was killed by a signal (no code)
    Failed { code: Option<i32> },
}

impl CompileStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileStatus::Success)
    }
}

impl From<ExitStatus> for CompileStatus {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            CompileStatus::Success
        } else {
            CompileStatus::Failed {
                code: status.code(),
            }
        }
    }
}

impl fmt::Display for CompileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileStatus::Success => write!(f, "success"),
            CompileStatus::Failed { code: Some(code) } => write!(f, "exit code {}", code),
            CompileStatus::Failed { code: None } => write!(f, "terminated by signal"),
        }
    }
}

/// Errors that prevent a compiler run from completing at all.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Failed to spawn compiler `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed waiting for compiler `{program}`: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

/// Something that can turn one Markdown source into one generated file.
pub trait Compiler: Send + Sync {
    /// Human-readable identifier used in logs (e.g., the program name)
    fn name(&self) -> &str;

    /// Run the compiler for `job` and wait for it to finish.
    ///
    /// A compiler that runs but reports failure returns `Ok(CompileStatus::Failed)`.
    /// `Err` is reserved for runs that could not be started or observed.
    fn compile(
        &self,
        job: &CompileJob,
    ) -> impl Future<Output = Result<CompileStatus, CompileError>> + Send;
}
