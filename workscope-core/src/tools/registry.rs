use crate::error::{ErrorPayload, ToolError};
use crate::settings::Settings;
use crate::tools::analyzer::analyze_python_file::AnalyzePythonFileTool;
use crate::tools::file::get_project_structure::GetProjectStructureTool;
use crate::tools::file::read_file_content::ReadFileContentTool;
use crate::tools::file::read_lines_from_file::ReadLinesFromFileTool;
use crate::tools::file::write_in_local_file::WriteInLocalFileTool;
use crate::tools::r#trait::{SharedTool, ToolCategory, ToolRequest};
use crate::tools::ToolName;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub category: ToolCategory,
}

/// Uniform envelope for every call. Failures carry a stable `kind` so callers
/// can branch without parsing messages.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl ToolResponse {
    fn failure(err: &ToolError) -> Self {
        Self {
            ok: false,
            result: None,
            diagnostics: Vec::new(),
            error: Some(err.to_payload()),
        }
    }
}

pub struct ToolRegistry {
    tools: BTreeMap<String, SharedTool>,
    next_call_id: AtomicU64,
}

impl ToolRegistry {
    pub fn new(tools: Vec<SharedTool>) -> Self {
        let mut registry = Self {
            tools: BTreeMap::new(),
            next_call_id: AtomicU64::new(1),
        };

        for tool in tools {
            registry.register_tool(tool);
        }

        registry
    }

    /// All five tools, sharing one settings value.
    pub fn with_default_tools(settings: Arc<Settings>) -> Self {
        let tools: Vec<SharedTool> = vec![
            Arc::new(GetProjectStructureTool::new(settings.clone())),
            Arc::new(ReadFileContentTool::new(settings.clone())),
            Arc::new(AnalyzePythonFileTool::new(settings.clone())),
            Arc::new(ReadLinesFromFileTool::new(settings.clone())),
            Arc::new(WriteInLocalFileTool::new(settings)),
        ];
        Self::new(tools)
    }

    pub fn register_tool(&mut self, tool: SharedTool) {
        let name = tool.name().to_string();
        debug!(tool_name = %name, "Registering tool");
        self.tools.insert(name, tool);
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
                category: tool.category(),
            })
            .collect()
    }

    pub fn list_tools(&self) -> Vec<ToolName> {
        self.tools.keys().map(ToolName::new).collect()
    }

    pub fn get_tool_category_by_name(&self, name: &str) -> Option<ToolCategory> {
        self.tools.get(name).map(|executor| executor.category())
    }

    /// Runs one tool. Never fails at this level: every error ends up in the
    /// response envelope.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResponse {
        let Some(tool) = self.tools.get(name) else {
            let available: Vec<String> = self.list_tools().iter().map(ToString::to_string).collect();
            error!(tool_name = %name, "Unknown tool");
            return ToolResponse::failure(&ToolError::UnknownTool(format!(
                "{name}. Available tools: {}",
                available.join(", ")
            )));
        };

        let tool_use_id = format!("call_{}", self.next_call_id.fetch_add(1, Ordering::Relaxed));
        debug!(tool_name = %name, %tool_use_id, "Dispatching tool call");
        let request = ToolRequest::new(arguments, tool_use_id);

        match tool.process(&request).await {
            Ok(output) => ToolResponse {
                ok: true,
                result: Some(output.result),
                diagnostics: output.diagnostics,
                error: None,
            },
            Err(e) => {
                error!(?e, tool_name = %name, kind = e.kind(), "Tool processing failed");
                ToolResponse::failure(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ToolRegistry;
    use crate::settings::Settings;
    use crate::tools::r#trait::ToolCategory;
    use serde_json::json;
    use std::sync::Arc;

    fn registry(root: &std::path::Path) -> ToolRegistry {
        ToolRegistry::with_default_tools(Arc::new(Settings::with_root(root)))
    }

    #[test]
    fn test_default_tools_registered() {
        let temp = tempfile::tempdir().unwrap();
        let registry = registry(temp.path());

        let names: Vec<String> = registry.list_tools().iter().map(|n| n.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "analyze_python_file",
                "get_project_structure",
                "read_file_content",
                "read_lines_from_file",
                "write_in_local_file",
            ]
        );
        assert_eq!(
            registry.get_tool_category_by_name("write_in_local_file"),
            Some(ToolCategory::Write)
        );
        assert_eq!(
            registry.get_tool_category_by_name("read_file_content"),
            Some(ToolCategory::ReadOnly)
        );
        assert!(registry
            .definitions()
            .iter()
            .all(|d| d.input_schema["type"] == "object"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let temp = tempfile::tempdir().unwrap();
        let response = registry(temp.path()).call("clean_html", json!({})).await;

        assert!(!response.ok);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"]["kind"], "unknown_tool");
        assert!(value.get("result").is_none());
        assert!(value.get("diagnostics").is_none());
    }

    #[tokio::test]
    async fn test_missing_argument() {
        let temp = tempfile::tempdir().unwrap();
        let response = registry(temp.path())
            .call("read_lines_from_file", json!({ "filepath": "a.txt" }))
            .await;

        assert_eq!(
            response.error.map(|e| e.kind),
            Some("invalid_arguments")
        );
    }
}
