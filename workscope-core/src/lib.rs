pub mod analyzer;
pub mod error;
pub mod file;
pub mod settings;
pub mod tools;

// Public library API. Hosts embedding the tools only need these.
pub use error::{ToolError, ToolResult};
pub use settings::{load_settings, Settings};
pub use tools::r#trait::ToolExecutor;
pub use tools::registry::{ToolDefinition, ToolRegistry, ToolResponse};
