//! Sequential doc builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use docbuild_compiler::{CompileError, CompileJob, CompileStatus, Compiler};

use crate::discover::{discover, DiscoverError};
use crate::naming::{output_name, relative_path, NamingError, OUTPUT_SUFFIX, SOURCE_SUFFIX};

/// Configuration for a build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory the source and output directories are resolved against, and
    /// the compiler's working directory
    pub root: PathBuf,

    /// Source directory, relative to the root
    pub source_dir: PathBuf,

    /// Only files ending with this suffix are compiled
    pub source_suffix: String,

    /// Output directory, relative to the root
    pub output_dir: PathBuf,

    /// Appended to each source's base name to form the output name
    pub output_suffix: String,

    /// Stop after the first file that fails
    pub fail_fast: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            source_dir: PathBuf::from("source"),
            source_suffix: SOURCE_SUFFIX.to_string(),
            output_dir: PathBuf::from("."),
            output_suffix: OUTPUT_SUFFIX.to_string(),
            fail_fast: false,
        }
    }
}

/// What happened to a single source file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The compiler ran to completion; `status` says whether it succeeded
    Compiled {
        output: PathBuf,
        status: CompileStatus,
    },

    /// The compiler could not be run
    Errored { output: PathBuf, error: CompileError },

    /// No compiler was run because no output name could be derived
    Skipped { reason: NamingError },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            FileOutcome::Compiled {
                status: CompileStatus::Success,
                ..
            }
        )
    }
}

/// A source file and its outcome.
#[derive(Debug)]
pub struct FileReport {
    pub source_name: String,
    pub outcome: FileOutcome,
}

/// Result of a build.
#[derive(Debug)]
pub struct BuildReport {
    /// Source files found, in processing order
    pub files: Vec<FileReport>,

    /// Number of source files discovered
    pub discovered: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

impl BuildReport {
    /// Number of files the compiler ran for, whatever its exit status.
    pub fn compiled(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Compiled { .. }))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.outcome.is_success())
    }

    /// Number of discovered files never attempted (fail-fast).
    pub fn not_attempted(&self) -> usize {
        self.discovered.saturating_sub(self.files.len())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none() && self.not_attempted() == 0
    }
}

/// Errors that abort a build before any file is compiled.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: String,
        source: std::io::Error,
    },
}

/// Compiles every source file through `C`, one at a time.
pub struct DocBuilder<C> {
    config: BuildConfig,
    compiler: C,
}

impl<C: Compiler> DocBuilder<C> {
    /// Create a new builder.
    pub fn new(config: BuildConfig, compiler: C) -> Self {
        Self { config, compiler }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the build.
    ///
    /// Files are taken from the end of the sorted worklist and the next
    /// compiler run starts only after the previous one has exited.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        let source_dir = self.config.root.join(&self.config.source_dir);
        let mut worklist = discover(&source_dir, &self.config.source_suffix)?;
        let discovered = worklist.len();

        let output_dir = self.config.root.join(&self.config.output_dir);
        fs::create_dir_all(&output_dir).map_err(|source| BuildError::CreateOutputDir {
            path: output_dir.display().to_string(),
            source,
        })?;

        tracing::info!("Compiling docs...");

        let mut files = Vec::with_capacity(discovered);

        while let Some(source_name) = worklist.pop() {
            let outcome = self.compile_one(&source_name).await;
            let failed = !outcome.is_success();

            files.push(FileReport {
                source_name,
                outcome,
            });

            if failed && self.config.fail_fast {
                tracing::warn!(
                    "Stopping after first failure, {} files not compiled",
                    worklist.len()
                );
                break;
            }
        }

        tracing::info!("DONE!");

        Ok(BuildReport {
            files,
            discovered,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// The job handed to the compiler for `source_name` and its output name.
    pub fn job(&self, source_name: &str, output_name: &str) -> CompileJob {
        CompileJob {
            source_name: source_name.to_string(),
            input: relative_path(&self.config.source_dir, source_name),
            output: relative_path(&self.config.output_dir, output_name),
            working_dir: self.config.root.clone(),
        }
    }

    async fn compile_one(&self, source_name: &str) -> FileOutcome {
        let outfile = match output_name(source_name, &self.config.output_suffix) {
            Ok(name) => name,
            Err(reason) => {
                tracing::warn!("Skipping {}: {}", source_name, reason);
                return FileOutcome::Skipped { reason };
            }
        };

        let job = self.job(source_name, &outfile);

        match self.compiler.compile(&job).await {
            Ok(status) => {
                tracing::info!("Compiled file: {}", job.output.display());
                if !status.is_success() {
                    tracing::warn!(
                        "{} failed on {} ({})",
                        self.compiler.name(),
                        job.input.display(),
                        status
                    );
                }
                FileOutcome::Compiled {
                    output: job.output,
                    status,
                }
            }
            Err(error) => {
                tracing::error!("Failed to compile {}: {}", job.input.display(), error);
                FileOutcome::Errored {
                    output: job.output,
                    error,
                }
            }
        }
    }
}
