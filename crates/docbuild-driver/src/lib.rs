//! Sequential build driver for docbuild.
//!
//! Finds Markdown sources in a single directory and feeds them, one at a time,
//! through a [`docbuild_compiler::Compiler`].

pub mod builder;
pub mod discover;
pub mod naming;

pub use builder::{BuildConfig, BuildError, BuildReport, DocBuilder, FileOutcome, FileReport};
pub use discover::{discover, DiscoverError};
pub use naming::{base_name, output_name, relative_path, NamingError};
