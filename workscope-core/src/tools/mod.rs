pub mod analyzer;
pub mod file;
pub mod registry;
pub mod r#trait;

use crate::error::{ToolError, ToolResult};
use serde_json::Value;

#[derive(Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ToolName(String);

impl ToolName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) fn required_str<'a>(arguments: &'a Value, key: &str) -> ToolResult<&'a str> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing required parameter: {key}")))
}

pub(crate) fn required_i64(arguments: &Value, key: &str) -> ToolResult<i64> {
    arguments
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing required integer: {key}")))
}

/// A list of strings. Absent or null is `None`; anything else that is not an
/// array of strings is rejected.
pub(crate) fn optional_str_list(arguments: &Value, key: &str) -> ToolResult<Option<Vec<String>>> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ToolError::InvalidArguments(format!("{key} must contain only strings"))
                })
            })
            .collect::<ToolResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(ToolError::InvalidArguments(format!(
            "{key} must be an array of strings"
        ))),
    }
}
