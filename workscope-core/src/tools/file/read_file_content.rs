use crate::error::ToolResult;
use crate::file::access::read_file_content;
use crate::file::resolver::Sandbox;
use crate::settings::Settings;
use crate::tools::r#trait::{ToolExecutor, ToolOutput, ToolRequest};
use crate::tools::required_str;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReadFileContentTool {
    settings: Arc<Settings>,
}

impl ReadFileContentTool {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for ReadFileContentTool {
    fn name(&self) -> &'static str {
        "read_file_content"
    }

    fn description(&self) -> &'static str {
        "Read a file inside a project. Text comes back as-is, anything that is not UTF-8 comes back base64 encoded, and a directory returns the names it contains."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_path": {
                    "type": "string",
                    "description": "Project directory, relative to the root"
                },
                "relative_path": {
                    "type": "string",
                    "description": "Path of the file inside the project"
                }
            },
            "required": ["project_path", "relative_path"]
        })
    }

    async fn process(&self, request: &ToolRequest) -> ToolResult<ToolOutput> {
        let project = required_str(&request.arguments, "project_path")?;
        let relative = required_str(&request.arguments, "relative_path")?;

        let sandbox = Sandbox::new(&self.settings.root)?;
        let content = read_file_content(&sandbox, project, relative)?;
        Ok(ToolOutput::result_only(serde_json::to_value(content)?))
    }
}
