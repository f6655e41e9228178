//! Compiler backed by an external process.

use tokio::process::Command;

use crate::traits::{CompileError, CompileJob, CompileStatus, Compiler};

/// Default compiler program.
pub const DEFAULT_PROGRAM: &str = "node";

/// Default leading argument: the booklisp entry point.
pub const DEFAULT_SCRIPT: &str = "./node_modules/booklisp/index.js";

/// Runs an external program once per job.
///
/// The program is invoked as `<program> <args...> <input> <output>` from the
/// job's working directory and inherits the parent's standard streams.
#[derive(Debug, Clone)]
pub struct ProcessCompiler {
    program: String,
    args: Vec<String>,
}

impl ProcessCompiler {
    /// Create a compiler that runs `program` with no leading arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the input and output paths.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, job: &CompileJob) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(&job.input)
            .arg(&job.output)
            .current_dir(&job.working_dir);
        cmd
    }
}

impl Default for ProcessCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM).with_args([DEFAULT_SCRIPT])
    }
}

impl Compiler for ProcessCompiler {
    fn name(&self) -> &str {
        &self.program
    }

    async fn compile(&self, job: &CompileJob) -> Result<CompileStatus, CompileError> {
        tracing::debug!(
            "Running {} {:?} {} {} in {}",
            self.program,
            self.args,
            job.input.display(),
            job.output.display(),
            job.working_dir.display()
        );

        let mut child = self
            .command(job)
            .spawn()
            .map_err(|source| CompileError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let status = child.wait().await.map_err(|source| CompileError::Wait {
            program: self.program.clone(),
            source,
        })?;

        tracing::debug!("{} exited with {:?}", self.program, status.code());

        Ok(status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn job(dir: &Path, input: &str, output: &str) -> CompileJob {
        CompileJob {
            source_name: "doc.md".to_string(),
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            working_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn defaults_to_booklisp() {
        let compiler = ProcessCompiler::default();

        assert_eq!(compiler.program(), "node");
        assert_eq!(compiler.args(), ["./node_modules/booklisp/index.js"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_input_then_output() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("source")).unwrap();
        fs::write(temp.path().join("source/doc.md"), "# Doc\n").unwrap();

        let compiler = ProcessCompiler::new("cp");
        let status = compiler
            .compile(&job(temp.path(), "./source/doc.md", "./doc.generated.md"))
            .await
            .unwrap();

        assert_eq!(status, CompileStatus::Success);
        assert_eq!(
            fs::read_to_string(temp.path().join("doc.generated.md")).unwrap(),
            "# Doc\n"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn leading_args_come_first() {
        let temp = tempdir().unwrap();

        let compiler = ProcessCompiler::new("sh")
            .with_args(["-c", r#"printf '%s\n' "$@" > args.txt"#, "sh", "--flag"]);
        compiler
            .compile(&job(temp.path(), "./source/a.md", "./a.generated.md"))
            .await
            .unwrap();

        let args = fs::read_to_string(temp.path().join("args.txt")).unwrap();
        assert_eq!(args, "--flag\n./source/a.md\n./a.generated.md\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_nonzero_exit() {
        let temp = tempdir().unwrap();
        let compiler = ProcessCompiler::new("sh").with_args(["-c", "exit 3", "sh"]);

        let status = compiler
            .compile(&job(temp.path(), "in.md", "out.md"))
            .await
            .unwrap();

        assert_eq!(status, CompileStatus::Failed { code: Some(3) });
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let temp = tempdir().unwrap();
        let compiler = ProcessCompiler::new("docbuild-no-such-compiler");

        let result = compiler.compile(&job(temp.path(), "in.md", "out.md")).await;

        assert!(matches!(result, Err(CompileError::Spawn { .. })));
    }
}
