use crate::error::{ToolError, ToolResult};
use crate::file::resolver::Sandbox;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Replaces `root/relative` with `lines`, each followed by `\n`, creating
/// missing parent directories. Whatever was there before is lost.
pub fn write_lines(sandbox: &Sandbox, relative: &str, lines: &[String]) -> ToolResult<PathBuf> {
    let path = sandbox.resolve_destination(sandbox.root(), relative)?;
    if path == sandbox.root() {
        return Err(ToolError::InvalidArguments(format!(
            "'{relative}' does not name a file"
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ToolError::io(parent, e))?;
    }

    let file = fs::File::create(&path).map_err(|e| ToolError::io(&path, e))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}").map_err(|e| ToolError::io(&path, e))?;
    }
    writer.flush().map_err(|e| ToolError::io(&path, e))?;

    tracing::info!(path = %path.display(), lines = lines.len(), "Wrote local file");
    Ok(path)
}
