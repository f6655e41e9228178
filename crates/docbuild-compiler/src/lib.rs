//! External document compiler invocation.
//!
//! docbuild never transforms Markdown itself. Each source file is handed to an
//! external compiler, and this crate owns that seam: the [`Compiler`] trait the
//! driver talks to and [`ProcessCompiler`], which runs the compiler as an OS process.

pub mod process;
pub mod traits;

pub use process::ProcessCompiler;
pub use traits::{CompileError, CompileJob, CompileStatus, Compiler};
