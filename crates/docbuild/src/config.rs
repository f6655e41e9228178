//! Configuration file (docbuild.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docbuild_compiler::ProcessCompiler;
use docbuild_driver::BuildConfig;
use serde::Deserialize;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "docbuild.toml";

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub source: SourceSettings,
    pub output: OutputSettings,
    pub compiler: CompilerSettings,
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSettings {
    pub dir: String,
    pub suffix: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            dir: "source".to_string(),
            suffix: ".md".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub dir: String,
    pub suffix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            suffix: ".generated.md".to_string(),
        }
    }
}

/// External compiler command. Unset fields fall back to the booklisp defaults.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerSettings {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSettings {
    pub fail_fast: bool,
}

impl ConfigFile {
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            root: PathBuf::from("."),
            source_dir: PathBuf::from(&self.source.dir),
            source_suffix: self.source.suffix.clone(),
            output_dir: PathBuf::from(&self.output.dir),
            output_suffix: self.output.suffix.clone(),
            fail_fast: self.build.fail_fast,
        }
    }

    pub fn compiler(&self) -> ProcessCompiler {
        let settings = &self.compiler;
        match (&settings.program, &settings.args) {
            (None, None) => ProcessCompiler::default(),
            (None, Some(args)) => ProcessCompiler::default().with_args(args.clone()),
            (Some(program), args) => {
                ProcessCompiler::new(program.clone()).with_args(args.clone().unwrap_or_default())
            }
        }
    }
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<ConfigFile> {
    toml::from_str(content).context("Failed to parse config")
}

/// Load configuration.
///
/// An explicitly given path must exist. Without one, docbuild.toml is used if
/// present and defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<ConfigFile> {
    let (config_path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };

    if !config_path.exists() {
        if required {
            anyhow::bail!("Config file not found: {}", config_path.display());
        }
        tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config =
        parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    tracing::info!("Loaded config from {}", config_path.display());
    Ok(config)
}
