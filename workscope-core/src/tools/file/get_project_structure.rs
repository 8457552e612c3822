use crate::error::ToolResult;
use crate::file::ignore::IgnoreMatcher;
use crate::file::resolver::Sandbox;
use crate::file::tree::build_project_tree;
use crate::settings::Settings;
use crate::tools::r#trait::{ToolExecutor, ToolOutput, ToolRequest};
use crate::tools::{optional_str_list, required_str};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct GetProjectStructureTool {
    settings: Arc<Settings>,
}

impl GetProjectStructureTool {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for GetProjectStructureTool {
    fn name(&self) -> &'static str {
        "get_project_structure"
    }

    fn description(&self) -> &'static str {
        "Return the file and directory structure of a project below the root as a nested mapping from entry name to entry. Files report size and extension, directories report their children."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_path": {
                    "type": "string",
                    "description": "Project directory, relative to the root"
                },
                "ignore_patterns": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Glob patterns matched against entry names. Replaces the configured patterns for this call."
                },
                "ignore_hidden": {
                    "type": "boolean",
                    "description": "Skip entries whose name starts with '.'"
                }
            },
            "required": ["project_path"]
        })
    }

    async fn process(&self, request: &ToolRequest) -> ToolResult<ToolOutput> {
        let project = required_str(&request.arguments, "project_path")?;
        let patterns = optional_str_list(&request.arguments, "ignore_patterns")?
            .unwrap_or_else(|| self.settings.ignore.patterns.clone());
        let ignore_hidden = request
            .arguments
            .get("ignore_hidden")
            .and_then(|v| v.as_bool())
            .unwrap_or(self.settings.ignore.hidden);

        let sandbox = Sandbox::new(&self.settings.root)?;
        let matcher = IgnoreMatcher::new(&patterns, ignore_hidden);
        let tree = build_project_tree(
            &sandbox,
            project,
            &matcher,
            self.settings.tree.retain_empty_dirs,
        )?;

        let diagnostics = tree
            .diagnostics
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ToolOutput::with_diagnostics(
            serde_json::to_value(&tree.children)?,
            diagnostics,
        ))
    }
}
