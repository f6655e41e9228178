//! Output file naming.

use std::path::{Component, Path, PathBuf};

/// Suffix a source file must carry to be compiled.
pub const SOURCE_SUFFIX: &str = ".md";

/// Suffix appended to the base name of every generated file.
pub const OUTPUT_SUFFIX: &str = ".generated.md";

/// Errors deriving an output name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("Empty base name in {0:?}: nothing precedes the first '.'")]
    EmptyBaseName(String),
}

/// The part of a file name before its first `.`.
///
/// `"guide.intro.md"` -> `"guide"`. A name without any `.` is returned whole.
pub fn base_name(file_name: &str) -> &str {
    file_name
        .split_once('.')
        .map_or(file_name, |(base, _)| base)
}

/// Derive the generated file name for a source file.
pub fn output_name(file_name: &str, suffix: &str) -> Result<String, NamingError> {
    let base = base_name(file_name);
    if base.is_empty() {
        return Err(NamingError::EmptyBaseName(file_name.to_string()));
    }

    Ok(format!("{}{}", base, suffix))
}

/// Build a `./`-prefixed path to `file_name` inside `dir`.
///
/// `("source", "a.md")` -> `./source/a.md`, `(".", "a.md")` -> `./a.md`.
/// Absolute directories stay absolute.
pub fn relative_path(dir: &Path, file_name: &str) -> PathBuf {
    let mut path = PathBuf::from(".");
    for component in dir.components() {
        if component != Component::CurDir {
            path.push(component.as_os_str());
        }
    }
    path.push(file_name);
    path
}
