use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use workscope_core::{Settings, ToolRegistry, ToolResponse};

pub struct Fixture {
    pub workspace_dir: TempDir,
    pub registry: ToolRegistry,
}

impl Fixture {
    /// A root containing `proj/` with a handful of ordinary, ignored and
    /// hidden entries.
    #[allow(dead_code)]
    pub fn new() -> Self {
        let fixture = Self::empty();
        fixture.write("proj/main.py", "print('hi')\n");
        fixture.write("proj/src/lib.py", "X = 1\n");
        fixture.write("proj/src/lib.pyc", "compiled");
        fixture.write("proj/.env", "SECRET=1\n");
        fixture.write("proj/app.log", "log line\n");
        fixture.mkdir("proj/node_modules/left-pad");
        fixture.mkdir("proj/empty");
        fixture
    }

    #[allow(dead_code)]
    pub fn empty() -> Self {
        Self::with_settings(|_| {})
    }

    /// Settings start from the defaults with the root pointed at the tempdir.
    #[allow(dead_code)]
    pub fn with_settings(configure: impl FnOnce(&mut Settings)) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let workspace_dir = TempDir::new().unwrap();
        let mut settings = Settings::with_root(workspace_dir.path());
        configure(&mut settings);
        let registry = ToolRegistry::with_default_tools(Arc::new(settings));

        Self {
            workspace_dir,
            registry,
        }
    }

    pub fn root(&self) -> &Path {
        self.workspace_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn mkdir(&self, relative: &str) {
        std::fs::create_dir_all(self.path(relative)).unwrap();
    }

    pub async fn call(&self, tool: &str, arguments: Value) -> ToolResponse {
        self.registry.call(tool, arguments).await
    }

    /// Calls a tool that is expected to succeed and returns its result.
    #[allow(dead_code)]
    pub async fn ok(&self, tool: &str, arguments: Value) -> Value {
        let response = self.call(tool, arguments).await;
        assert!(response.ok, "{tool} failed: {:?}", response.error);
        response.result.unwrap_or(Value::Null)
    }

    /// Calls a tool that is expected to fail and returns the error kind.
    #[allow(dead_code)]
    pub async fn err(&self, tool: &str, arguments: Value) -> &'static str {
        let response = self.call(tool, arguments).await;
        assert!(!response.ok, "{tool} unexpectedly succeeded: {:?}", response.result);
        response.error.map(|e| e.kind).unwrap_or_default()
    }
}
