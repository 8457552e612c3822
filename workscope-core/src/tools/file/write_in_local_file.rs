use crate::error::{ToolError, ToolResult};
use crate::file::resolver::Sandbox;
use crate::file::writer::write_lines;
use crate::settings::Settings;
use crate::tools::r#trait::{ToolCategory, ToolExecutor, ToolOutput, ToolRequest};
use crate::tools::{optional_str_list, required_str};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct WriteInLocalFileTool {
    settings: Arc<Settings>,
}

impl WriteInLocalFileTool {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for WriteInLocalFileTool {
    fn name(&self) -> &'static str {
        "write_in_local_file"
    }

    fn description(&self) -> &'static str {
        "Replace the contents of a file below the root with the given lines, one per line. Missing parent directories are created. Existing content is overwritten."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "Destination, relative to the root"
                },
                "lines": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Lines to write, without line terminators"
                }
            },
            "required": ["filepath", "lines"]
        })
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Write
    }

    async fn process(&self, request: &ToolRequest) -> ToolResult<ToolOutput> {
        let filepath = required_str(&request.arguments, "filepath")?;
        let lines = optional_str_list(&request.arguments, "lines")?
            .ok_or_else(|| ToolError::InvalidArguments("Missing required parameter: lines".to_string()))?;

        let sandbox = Sandbox::new(&self.settings.root)?;
        write_lines(&sandbox, filepath, &lines)?;
        Ok(ToolOutput::result_only(Value::Null))
    }
}
