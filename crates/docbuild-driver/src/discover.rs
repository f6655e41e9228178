//! Source file discovery.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use walkdir::WalkDir;

/// Errors that can occur while listing the source directory.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("Source directory not found: {0}")]
    NotFound(String),

    #[error("Failed to access source directory {path}: {source}")]
    Metadata {
        path: String,
        source: std::io::Error,
    },

    #[error("Source path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to read source directory {path}: {source}")]
    Read {
        path: String,
        source: walkdir::Error,
    },
}

/// List the files directly inside `source_dir` whose names end with `suffix`.
///
/// Subdirectories are not traversed. Names are returned sorted so the build
/// order does not depend on the filesystem.
pub fn discover(source_dir: &Path, suffix: &str) -> Result<Vec<String>, DiscoverError> {
    let metadata = match fs::metadata(source_dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(DiscoverError::NotFound(source_dir.display().to_string()));
        }
        Err(source) => {
            return Err(DiscoverError::Metadata {
                path: source_dir.display().to_string(),
                source,
            });
        }
    };
    if !metadata.is_dir() {
        return Err(DiscoverError::NotADirectory(
            source_dir.display().to_string(),
        ));
    }

    let mut names = Vec::new();

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            // The directory itself could not be listed
            Err(e) if e.depth() == 0 => {
                return Err(DiscoverError::Read {
                    path: source_dir.display().to_string(),
                    source: e,
                });
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };

        if name.ends_with(suffix) {
            names.push(name.to_string());
        }
    }

    names.sort();

    tracing::debug!(
        "Found {} source files in {}",
        names.len(),
        source_dir.display()
    );

    Ok(names)
}
