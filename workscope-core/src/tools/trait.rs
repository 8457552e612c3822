use crate::error::ToolResult;
use serde_json::Value;
use std::sync::Arc;

/// Request passed to tool execution
#[derive(Debug, Clone)]
pub struct ToolRequest {
    /// The arguments for the tool
    pub arguments: Value,
    /// The unique ID for this tool use
    pub tool_use_id: String,
}

impl ToolRequest {
    pub fn new(arguments: Value, tool_use_id: String) -> Self {
        Self {
            arguments,
            tool_use_id,
        }
    }
}

/// What a successful call produced. Diagnostics describe entries that were
/// skipped along the way; they never turn the call into a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub result: Value,
    pub diagnostics: Vec<Value>,
}

impl ToolOutput {
    pub fn result_only(result: Value) -> Self {
        Self {
            result,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(result: Value, diagnostics: Vec<Value>) -> Self {
        Self {
            result,
            diagnostics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    ReadOnly,
    /// Changes files below the root.
    Write,
}

#[async_trait::async_trait(?Send)]
pub trait ToolExecutor {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;

    fn category(&self) -> ToolCategory {
        ToolCategory::ReadOnly
    }

    async fn process(&self, request: &ToolRequest) -> ToolResult<ToolOutput>;
}

pub type SharedTool = Arc<dyn ToolExecutor>;
