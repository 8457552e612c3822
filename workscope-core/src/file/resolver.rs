use crate::error::{ToolError, ToolResult};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Maps caller supplied paths onto the configured root directory and refuses
/// anything that would land outside of it.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// The root is made absolute and normalized once. Whether it exists is
    /// only checked when a call actually needs it.
    pub fn new(root: &Path) -> ToolResult<Self> {
        let absolute = if root.is_absolute() {
            root.to_path_buf()
        } else {
            let cwd = std::env::current_dir().map_err(|e| ToolError::io(root, e))?;
            cwd.join(root)
        };
        Ok(Self {
            root: normalize(&absolute),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fails unless the root itself is an existing directory.
    pub fn ensure_root(&self) -> ToolResult<()> {
        ensure_directory(&self.root, &self.root.display().to_string())
    }

    /// Resolves `root/project` and checks it is a directory.
    pub fn project(&self, project: &str) -> ToolResult<PathBuf> {
        self.ensure_root()?;
        let path = self.resolve(&self.root, project)?;
        ensure_directory(&path, project)?;
        Ok(path)
    }

    /// Resolves `relative` beneath `base` and requires the result to exist.
    pub fn resolve(&self, base: &Path, relative: &str) -> ToolResult<PathBuf> {
        let path = self.resolve_destination(base, relative)?;
        if !path.exists() {
            return Err(ToolError::NotFound(relative.to_string()));
        }
        Ok(path)
    }

    /// Same containment checks as [`Sandbox::resolve`] without requiring the
    /// target to exist yet.
    pub fn resolve_destination(&self, base: &Path, relative: &str) -> ToolResult<PathBuf> {
        if has_parent_segment(relative) {
            return Err(ToolError::PathTraversal(relative.to_string()));
        }

        let base = normalize(base);
        if !base.starts_with(&self.root) {
            return Err(ToolError::PathTraversal(base.display().to_string()));
        }

        let resolved = normalize(&base.join(relative));
        if !resolved.starts_with(&base) {
            return Err(ToolError::PathTraversal(relative.to_string()));
        }
        self.ensure_physically_inside(&resolved, relative)?;

        tracing::debug!(relative, resolved = %resolved.display(), "Resolved sandbox path");
        Ok(resolved)
    }

    /// Resolves a path that is either relative to the root or absolute and
    /// already inside it.
    pub fn resolve_in_root(&self, path: &str) -> ToolResult<PathBuf> {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            if has_parent_segment(path) {
                return Err(ToolError::PathTraversal(path.to_string()));
            }
            let normalized = normalize(candidate);
            if !normalized.starts_with(&self.root) {
                return Err(ToolError::PathTraversal(path.to_string()));
            }
            self.ensure_physically_inside(&normalized, path)?;
            if !normalized.exists() {
                return Err(ToolError::NotFound(path.to_string()));
            }
            return Ok(normalized);
        }
        self.resolve(&self.root, path)
    }

    /// The lexical checks above cannot see symlinks. Compares the target
    /// and the root after resolving every link along the existing part of
    /// each path.
    fn ensure_physically_inside(&self, path: &Path, shown: &str) -> ToolResult<()> {
        let root = canonicalize_existing_prefix(&self.root)?;
        let target = canonicalize_existing_prefix(path)?;
        if !target.starts_with(&root) {
            tracing::warn!(
                path = shown,
                target = %target.display(),
                "Path leaves the sandbox through a symlink"
            );
            return Err(ToolError::PathTraversal(shown.to_string()));
        }
        Ok(())
    }

    /// Converts an absolute path below the root into its forward slash
    /// relative form.
    pub fn relative(&self, path: &Path) -> Option<String> {
        path.strip_prefix(&self.root).ok().map(to_forward_slashes)
    }
}

fn ensure_directory(path: &Path, display: &str) -> ToolResult<()> {
    match path.metadata() {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ToolError::NotADirectory(display.to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(ToolError::NotFound(display.to_string()))
        }
        Err(e) => Err(ToolError::io(path, e)),
    }
}

const MAX_LINK_HOPS: usize = 40;

/// Canonicalizes the deepest ancestor of `path` that exists and appends the
/// components below it unchanged. `path` must already be normalized. A
/// dangling symlink is followed to where it points, since creating a file
/// through it would land there.
fn canonicalize_existing_prefix(path: &Path) -> ToolResult<PathBuf> {
    let mut missing: Vec<OsString> = Vec::new();
    let mut current = path.to_path_buf();
    let mut hops = 0;
    loop {
        match fs::canonicalize(&current) {
            Ok(canonical) => {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(canonical, |acc, name| acc.join(name)));
            }
            Err(_) => {
                if let Ok(target) = fs::read_link(&current) {
                    hops += 1;
                    if hops > MAX_LINK_HOPS {
                        return Err(ToolError::PathTraversal(path.display().to_string()));
                    }
                    let parent = current.parent().unwrap_or(Path::new(""));
                    current = normalize(&parent.join(target));
                    continue;
                }
                let (Some(parent), Some(name)) = (current.parent(), current.file_name()) else {
                    return Ok(current.clone());
                };
                missing.push(name.to_os_string());
                current = parent.to_path_buf();
            }
        }
    }
}

/// True when any segment of the raw string is `..`, whichever separator the
/// caller used.
fn has_parent_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

/// Lexical normalization: drops `.` segments, folds `..` into its parent and
/// collapses redundant separators. Never touches the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

pub fn to_forward_slashes(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/")
}
