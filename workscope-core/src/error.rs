use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Access denied: '{0}' escapes the sandbox")]
    PathTraversal(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Syntax error in {path:?} at line {line}, column {column}")]
    ParseSyntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("Parser unavailable: {0}")]
    ParserUnavailable(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable identifier reported to callers alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PathTraversal(_) => "path_traversal",
            Self::NotFound(_) => "not_found",
            Self::NotADirectory(_) => "not_a_directory",
            Self::ParseSyntax { .. } => "parse_syntax",
            Self::ParserUnavailable(_) => "parser_unavailable",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::UnknownTool(_) => "unknown_tool",
            Self::Io { .. } => "io",
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorPayload {
    pub kind: &'static str,
    pub message: String,
}

impl From<serde_json::Error> for ToolError {
    fn from(source: serde_json::Error) -> Self {
        Self::InvalidArguments(source.to_string())
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
