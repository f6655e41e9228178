//! docbuild CLI - compile Markdown sources through an external doc compiler.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod build;
mod config;

#[derive(Parser)]
#[command(name = "docbuild")]
#[command(about = "Compile every Markdown file in ./source with an external doc compiler")]
#[command(version)]
pub struct Cli {
    /// Path to config file (defaults to docbuild.toml, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source directory (overrides config)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Stop after the first file that fails to compile
    #[arg(long)]
    fail_fast: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    build::run(build::Options {
        config: cli.config,
        source: cli.source,
        fail_fast: cli.fail_fast,
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn runs_without_arguments() {
        let cli = Cli::try_parse_from(["docbuild"]).unwrap();

        assert!(cli.config.is_none());
        assert!(cli.source.is_none());
        assert!(!cli.fail_fast);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "docbuild",
            "--config",
            "ci.toml",
            "-s",
            "docs",
            "--fail-fast",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        assert_eq!(cli.source, Some(PathBuf::from("docs")));
        assert!(cli.fail_fast);
        assert!(cli.verbose);
    }
}
