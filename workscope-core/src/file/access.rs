use crate::error::{ToolError, ToolResult};
use crate::file::resolver::Sandbox;
use crate::file::tree::extension_of;
use base64::Engine;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// What a read produced. Binary content is a shape of the answer, not a
/// failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileContent {
    File {
        extension: String,
        data: String,
    },
    Binary {
        extension: String,
        encoding: ContentEncoding,
        data: String,
    },
    Directory {
        data: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentEncoding {
    Base64,
}

/// Reads `root/project/relative`, falling back to base64 for content that is
/// not valid UTF-8 and to a bare name listing for directories.
pub fn read_file_content(
    sandbox: &Sandbox,
    project: &str,
    relative: &str,
) -> ToolResult<FileContent> {
    let project_dir = sandbox.resolve_destination(sandbox.root(), project)?;
    let path = sandbox.resolve(&project_dir, relative)?;

    if path.is_dir() {
        return list_directory(&path);
    }

    let extension = path
        .file_name()
        .map(|name| extension_of(&name.to_string_lossy()))
        .unwrap_or_default();

    let bytes = fs::read(&path).map_err(|e| ToolError::io(&path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(FileContent::File {
            extension,
            data: text,
        }),
        Err(e) => {
            tracing::debug!(path = %path.display(), "Content is not UTF-8, returning base64");
            Ok(FileContent::Binary {
                extension,
                encoding: ContentEncoding::Base64,
                data: base64::engine::general_purpose::STANDARD.encode(e.into_bytes()),
            })
        }
    }
}

/// Reads a file that must be UTF-8 text. Anything else is the caller's
/// mistake, not an I/O failure.
pub fn read_text(path: &Path) -> ToolResult<String> {
    let bytes = fs::read(path).map_err(|e| ToolError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| {
        ToolError::InvalidArguments(format!("{} is not valid UTF-8", path.display()))
    })
}

fn list_directory(path: &Path) -> ToolResult<FileContent> {
    let entries = fs::read_dir(path).map_err(|e| ToolError::io(path, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ToolError::io(path, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(FileContent::Directory { data: names })
}
