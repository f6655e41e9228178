//! The build action.

use std::path::PathBuf;

use anyhow::Result;
use docbuild_driver::{BuildReport, DocBuilder, FileOutcome};

use crate::config;

/// Command-line overrides for a build.
#[derive(Debug, Default)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub fail_fast: bool,
}

/// Run the build.
pub async fn run(options: Options) -> Result<()> {
    let file_config = config::load(options.config.as_deref())?;

    let mut build_config = file_config.build_config();
    if let Some(source) = options.source {
        build_config.source_dir = source;
    }
    build_config.fail_fast |= options.fail_fast;

    let report = DocBuilder::new(build_config, file_config.compiler())
        .build()
        .await?;

    summarize(&report)
}

/// Log the outcome and turn any failure into an error.
fn summarize(report: &BuildReport) -> Result<()> {
    tracing::info!(
        "Compiled {} of {} files in {}ms",
        report.compiled(),
        report.discovered,
        report.duration_ms
    );

    if report.is_success() {
        return Ok(());
    }

    let mut failed = 0;
    for file in report.failures() {
        failed += 1;
        tracing::error!("{}: {}", file.source_name, describe(&file.outcome));
    }

    anyhow::bail!(
        "{} of {} files failed, {} not attempted",
        failed,
        report.discovered,
        report.not_attempted()
    )
}

fn describe(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Compiled { output, status } => {
            format!("{} ({})", output.display(), status)
        }
        FileOutcome::Errored { output, error } => format!("{} ({})", output.display(), error),
        FileOutcome::Skipped { reason } => format!("skipped ({})", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbuild_compiler::CompileStatus;
    use docbuild_driver::{FileReport, NamingError};

    fn compiled(name: &str, status: CompileStatus) -> FileReport {
        FileReport {
            source_name: name.to_string(),
            outcome: FileOutcome::Compiled {
                output: PathBuf::from(format!("./{}", name)),
                status,
            },
        }
    }

    #[test]
    fn clean_build_succeeds() {
        let report = BuildReport {
            files: vec![compiled("a.md", CompileStatus::Success)],
            discovered: 1,
            duration_ms: 3,
        };

        assert!(summarize(&report).is_ok());
    }

    #[test]
    fn empty_build_succeeds() {
        let report = BuildReport {
            files: vec![],
            discovered: 0,
            duration_ms: 0,
        };

        assert!(summarize(&report).is_ok());
    }

    #[test]
    fn failed_compiler_fails_the_build() {
        let report = BuildReport {
            files: vec![
                compiled("b.md", CompileStatus::Failed { code: Some(2) }),
                compiled("a.md", CompileStatus::Success),
            ],
            discovered: 2,
            duration_ms: 3,
        };

        let err = summarize(&report).unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 files failed, 0 not attempted");
    }

    #[test]
    fn skipped_and_unattempted_files_fail_the_build() {
        let report = BuildReport {
            files: vec![FileReport {
                source_name: ".md".to_string(),
                outcome: FileOutcome::Skipped {
                    reason: NamingError::EmptyBaseName(".md".to_string()),
                },
            }],
            discovered: 3,
            duration_ms: 1,
        };

        let err = summarize(&report).unwrap_err();

        assert_eq!(err.to_string(), "1 of 3 files failed, 2 not attempted");
    }

    #[test]
    fn describes_outcomes() {
        let outcome = FileOutcome::Compiled {
            output: PathBuf::from("./a.generated.md"),
            status: CompileStatus::Failed { code: Some(1) },
        };

        assert_eq!(describe(&outcome), "./a.generated.md (exit code 1)");
    }
}
