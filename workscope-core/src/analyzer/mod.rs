//! Static structure of Python sources. Nothing here executes or imports the
//! analyzed code.

pub mod python;
pub mod types;

pub use types::{ClassInfo, ConstantInfo, FunctionInfo, ModuleIndex, ParameterInfo, ParameterKind};

use crate::error::ToolResult;
use crate::file::access::read_text;
use std::path::Path;

/// Reads `path` as UTF-8 and indexes it.
pub fn analyze_python_file(path: &Path) -> ToolResult<ModuleIndex> {
    let source = read_text(path)?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "Analyzing Python source");
    python::analyze_source(&source, path)
}
