use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Entries skipped by `get_project_structure` unless the caller passes its
/// own list.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "*.pyc",
    "__pycache__",
    "node_modules",
    "venv",
    ".git/**",
    "*.log",
    "build",
    "dist",
    ".DS_Store",
    "SensitiveConfig*",
    "s.yaml",
    "s*.yaml",
    "logs/**",
    "config.ini",
    "migrations/**",
    "tmp/**",
    "pb2/**",
];

fn default_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_ignore_patterns() -> Vec<String> {
    DEFAULT_IGNORE_PATTERNS
        .iter()
        .map(|pattern| pattern.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

/// Process wide configuration. Built once at startup and shared read-only
/// with every tool; nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Settings {
    /// Directory every project lives under. Projects are addressed by their
    /// directory name relative to this root.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub ignore: IgnoreSettings,

    #[serde(default)]
    pub tree: TreeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: default_root(),
            ignore: IgnoreSettings::default(),
            tree: TreeSettings::default(),
        }
    }
}

impl Settings {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}

/// Exclusion rules applied while building a project structure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IgnoreSettings {
    /// Glob patterns matched against bare entry names. A pattern ending in
    /// `/**` excludes directories whose name matches the part before it.
    #[serde(default = "default_ignore_patterns")]
    pub patterns: Vec<String>,

    /// Skip entries whose name starts with a dot.
    #[serde(default = "default_true")]
    pub hidden: bool,
}

impl IgnoreSettings {
    pub const NAMESPACE: &str = "ignore";
}

impl Default for IgnoreSettings {
    fn default() -> Self {
        Self {
            patterns: default_ignore_patterns(),
            hidden: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TreeSettings {
    /// Keep directories that end up with no surviving children.
    #[serde(default = "default_true")]
    pub retain_empty_dirs: bool,
}

impl TreeSettings {
    pub const NAMESPACE: &str = "tree";
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            retain_empty_dirs: true,
        }
    }
}
