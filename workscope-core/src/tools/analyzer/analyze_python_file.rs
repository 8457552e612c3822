use crate::analyzer::analyze_python_file;
use crate::error::ToolResult;
use crate::file::resolver::Sandbox;
use crate::settings::Settings;
use crate::tools::r#trait::{ToolExecutor, ToolOutput, ToolRequest};
use crate::tools::required_str;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct AnalyzePythonFileTool {
    settings: Arc<Settings>,
}

impl AnalyzePythonFileTool {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for AnalyzePythonFileTool {
    fn name(&self) -> &'static str {
        "analyze_python_file"
    }

    fn description(&self) -> &'static str {
        "Parse a Python file without running it and list its module level functions, classes (with their methods and nested classes) and UPPER_CASE constants, with line numbers, signatures and docstrings."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "Path relative to the root, or an absolute path inside it"
                }
            },
            "required": ["filepath"]
        })
    }

    async fn process(&self, request: &ToolRequest) -> ToolResult<ToolOutput> {
        let filepath = required_str(&request.arguments, "filepath")?;

        let sandbox = Sandbox::new(&self.settings.root)?;
        let path = sandbox.resolve_in_root(filepath)?;
        let index = analyze_python_file(&path)?;
        Ok(ToolOutput::result_only(serde_json::to_value(index)?))
    }
}
