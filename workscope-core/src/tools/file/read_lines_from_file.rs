use crate::error::ToolResult;
use crate::file::lines::read_lines;
use crate::file::resolver::Sandbox;
use crate::settings::Settings;
use crate::tools::r#trait::{ToolExecutor, ToolOutput, ToolRequest};
use crate::tools::{required_i64, required_str};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReadLinesFromFileTool {
    settings: Arc<Settings>,
}

impl ReadLinesFromFileTool {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for ReadLinesFromFileTool {
    fn name(&self) -> &'static str {
        "read_lines_from_file"
    }

    fn description(&self) -> &'static str {
        "Return lines start_line through end_line (1-indexed, inclusive) of a text file, line endings included. Ranges past the end of the file are clipped."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "Path relative to the root, or an absolute path inside it"
                },
                "start_line": {
                    "type": "integer",
                    "description": "First line to return, starting at 1"
                },
                "end_line": {
                    "type": "integer",
                    "description": "Last line to return"
                }
            },
            "required": ["filepath", "start_line", "end_line"]
        })
    }

    async fn process(&self, request: &ToolRequest) -> ToolResult<ToolOutput> {
        let filepath = required_str(&request.arguments, "filepath")?;
        let start_line = required_i64(&request.arguments, "start_line")?;
        let end_line = required_i64(&request.arguments, "end_line")?;

        let sandbox = Sandbox::new(&self.settings.root)?;
        let path = sandbox.resolve_in_root(filepath)?;
        let lines = read_lines(&path, start_line, end_line)?;
        Ok(ToolOutput::result_only(Value::String(lines)))
    }
}
