use crate::error::{ToolError, ToolResult};
use crate::file::ignore::IgnoreMatcher;
use crate::file::resolver::Sandbox;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FsEntry {
    File {
        #[serde(skip)]
        name: String,
        path: String,
        size: u64,
        extension: String,
    },
    Directory {
        #[serde(skip)]
        name: String,
        path: String,
        children: Children,
    },
}

impl FsEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Directory { path, .. } => path,
        }
    }
}

/// Entries of one directory in the order the filesystem listed them.
/// Serialized as a map keyed by entry name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(Vec<FsEntry>);

impl Children {
    pub fn get(&self, name: &str) -> Option<&FsEntry> {
        self.0.iter().find(|entry| entry.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(FsEntry::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FsEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, entry: FsEntry) {
        self.0.push(entry);
    }
}

impl Serialize for Children {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(entry.name(), entry)?;
        }
        map.end()
    }
}

/// An entry that could not be inspected and was left out of the structure.
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
pub struct EntryDiagnostic {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectTree {
    pub children: Children,
    pub diagnostics: Vec<EntryDiagnostic>,
}

/// Builds the structure of `root/project`. Only a missing root or project
/// (or an unreadable project directory) fails the call; anything that goes
/// wrong below that is reported as a diagnostic.
pub fn build_project_tree(
    sandbox: &Sandbox,
    project: &str,
    ignore: &IgnoreMatcher,
    retain_empty_dirs: bool,
) -> ToolResult<ProjectTree> {
    let project_dir = sandbox.project(project)?;
    let entries = fs::read_dir(&project_dir).map_err(|e| ToolError::io(&project_dir, e))?;

    let mut builder = TreeBuilder {
        ignore,
        retain_empty_dirs,
        diagnostics: Vec::new(),
    };
    let children = builder.build_entries(entries, "");

    Ok(ProjectTree {
        children,
        diagnostics: builder.diagnostics,
    })
}

struct TreeBuilder<'a> {
    ignore: &'a IgnoreMatcher,
    retain_empty_dirs: bool,
    diagnostics: Vec<EntryDiagnostic>,
}

impl TreeBuilder<'_> {
    fn build(&mut self, directory: &Path, relative: &str) -> Option<Children> {
        match fs::read_dir(directory) {
            Ok(entries) => Some(self.build_entries(entries, relative)),
            Err(e) => {
                self.record(relative, &e);
                None
            }
        }
    }

    fn build_entries(&mut self, entries: fs::ReadDir, relative: &str) -> Children {
        let mut children = Children::default();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.record(relative, &e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let item_relative = if relative.is_empty() {
                name.clone()
            } else {
                format!("{relative}/{name}")
            };
            let item_path = entry.path();

            // Follows symlinks, so a dangling link lands in the error arm
            let metadata = match fs::metadata(&item_path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    if !self.ignore.should_ignore(&name, false) {
                        self.record(&item_relative, &e);
                    }
                    continue;
                }
            };

            let is_dir = metadata.is_dir();
            if self.ignore.should_ignore(&name, is_dir) {
                continue;
            }

            if is_dir {
                let Some(grandchildren) = self.build(&item_path, &item_relative) else {
                    continue;
                };
                if grandchildren.is_empty() && !self.retain_empty_dirs {
                    continue;
                }
                children.push(FsEntry::Directory {
                    name,
                    path: item_relative,
                    children: grandchildren,
                });
            } else {
                let extension = extension_of(&name);
                children.push(FsEntry::File {
                    name,
                    path: item_relative,
                    size: metadata.len(),
                    extension,
                });
            }
        }
        children
    }

    fn record(&mut self, path: &str, error: &std::io::Error) {
        warn!(path, error = %error, "Skipping entry while building project structure");
        self.diagnostics.push(EntryDiagnostic {
            path: path.to_string(),
            message: error.to_string(),
        });
    }
}

/// Lowercased extension including its dot. Leading dots belong to the name,
/// so `.bashrc` has no extension while `archive.tar.GZ` has `.gz`.
pub fn extension_of(name: &str) -> String {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(dot) => name[stem_start + dot..].to_lowercase(),
        None => String::new(),
    }
}
