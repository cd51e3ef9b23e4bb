//! Source-tree paths - WHERE things live.
//!
//! Paths in a build description are written either source-absolute
//! (`//foo/bar.c`, rooted at the repository root), system-absolute
//! (`/usr/include/`), or relative to the directory of the file being
//! evaluated. [`SourceDir`] and [`SourceFile`] always hold the normalized
//! absolute form so they can be compared by value.

use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;

/// Error produced while normalizing or resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty path")]
    Empty,

    #[error("path `{path}` goes above the source root")]
    EscapesRoot { path: String },

    #[error("`{path}` is a directory, expected a file")]
    NotAFile { path: String },

    #[error("`{path}` is not an absolute path")]
    NotAbsolute { path: String },
}

/// A normalized directory in the source tree, always ending in `/`.
///
/// Examples: `//`, `//foo/bar/`, `/usr/include/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceDir {
    value: String,
}

/// A normalized file in the source tree, never ending in `/`.
///
/// Examples: `//foo/bar.c`, `/tmp/gen.h`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile {
    value: String,
}

impl SourceDir {
    /// The repository root, `//`.
    pub fn root() -> Self {
        SourceDir {
            value: "//".to_string(),
        }
    }

    /// Create a directory from an absolute path string.
    ///
    /// A missing trailing slash is added.
    pub fn new(path: &str) -> Result<Self, PathError> {
        if !is_absolute(path) {
            return Err(if path.is_empty() {
                PathError::Empty
            } else {
                PathError::NotAbsolute {
                    path: path.to_string(),
                }
            });
        }
        let mut value = normalize(path)?;
        if !value.ends_with('/') {
            value.push('/');
        }
        Ok(SourceDir { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The directory without its trailing slash.
    ///
    /// The roots have no such form, so `//` becomes `//.` and `/` becomes `/.`.
    pub fn without_last_slash(&self) -> String {
        match self.value.as_str() {
            "//" => "//.".to_string(),
            "/" => "/.".to_string(),
            v => v[..v.len() - 1].to_string(),
        }
    }

    /// The last path component, if this is not a root.
    pub fn last_component(&self) -> Option<&str> {
        let trimmed = self.value.trim_end_matches('/');
        let name = trimmed.rsplit('/').next()?;
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Resolve a directory reference written relative to this directory.
    ///
    /// System-absolute input that lies inside `root_path` is rewritten to
    /// its source-absolute form, so `/src/proj/foo` with root `/src/proj`
    /// resolves to `//foo/`.
    pub fn resolve_relative_dir(&self, input: &str, root_path: &Path) -> Result<SourceDir, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        let joined = self.join_input(input, root_path);
        SourceDir::new(&joined)
    }

    /// Resolve a file reference written relative to this directory.
    pub fn resolve_relative_file(&self, input: &str, root_path: &Path) -> Result<SourceFile, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        if input.ends_with('/') {
            return Err(PathError::NotAFile {
                path: input.to_string(),
            });
        }
        let joined = self.join_input(input, root_path);
        SourceFile::new(&joined)
    }

    fn join_input(&self, input: &str, root_path: &Path) -> String {
        if input.starts_with("//") {
            input.to_string()
        } else if input.starts_with('/') {
            make_source_absolute_if_possible(input, root_path)
        } else {
            format!("{}{}", self.value, input)
        }
    }
}

impl SourceFile {
    /// Create a file from an absolute path string.
    pub fn new(path: &str) -> Result<Self, PathError> {
        if !is_absolute(path) {
            return Err(if path.is_empty() {
                PathError::Empty
            } else {
                PathError::NotAbsolute {
                    path: path.to_string(),
                }
            });
        }
        let value = normalize(path)?;
        if value.ends_with('/') {
            return Err(PathError::NotAFile { path: value });
        }
        Ok(SourceFile { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The file name, `bar.c` for `//foo/bar.c`.
    pub fn name(&self) -> &str {
        match self.value.rfind('/') {
            Some(idx) => &self.value[idx + 1..],
            None => &self.value,
        }
    }

    /// The file name up to its last dot, `bar` for `//foo/bar.c`.
    ///
    /// A name whose only dot is the first character has an empty stem.
    pub fn name_no_extension(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(idx) => &name[..idx],
            None => name,
        }
    }

    /// The text after the last dot of the file name, or `""`.
    pub fn extension(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(idx) => &name[idx + 1..],
            None => "",
        }
    }

    /// The containing directory.
    pub fn dir(&self) -> SourceDir {
        let idx = self.value.rfind('/').unwrap_or(0);
        SourceDir {
            value: self.value[..=idx].to_string(),
        }
    }
}

impl fmt::Display for SourceDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Collapse `.`, `..` and repeated slashes in an absolute path.
///
/// A trailing slash (or a trailing `.`/`..` segment) marks a directory and
/// is kept. Source-absolute paths may not climb above `//`; system-absolute
/// paths stop at `/`.
fn normalize(path: &str) -> Result<String, PathError> {
    let (prefix, rest) = if let Some(rest) = path.strip_prefix("//") {
        ("//", rest)
    } else if let Some(rest) = path.strip_prefix('/') {
        ("/", rest)
    } else {
        return Err(PathError::NotAbsolute {
            path: path.to_string(),
        });
    };

    let mut parts: Vec<&str> = Vec::new();
    let mut is_dir = rest.is_empty();
    for segment in rest.split('/') {
        is_dir = false;
        match segment {
            "" => is_dir = true,
            "." => is_dir = true,
            ".." => {
                is_dir = true;
                if parts.pop().is_none() && prefix == "//" {
                    return Err(PathError::EscapesRoot {
                        path: path.to_string(),
                    });
                }
            }
            s => parts.push(s),
        }
    }

    let mut out = String::with_capacity(path.len());
    out.push_str(prefix);
    out.push_str(&parts.join("/"));
    if is_dir && !parts.is_empty() {
        out.push('/');
    }
    Ok(out)
}

fn make_source_absolute_if_possible(input: &str, root_path: &Path) -> String {
    let root = path_to_slashes(root_path);
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return input.to_string();
    }
    if input == root {
        return "//".to_string();
    }
    match input.strip_prefix(root) {
        Some(rest) if rest.starts_with('/') => format!("/{}", rest),
        _ => input.to_string(),
    }
}

fn path_to_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Convert a source path string to a filesystem path under `root_path`.
fn to_system_path(value: &str, root_path: &Path) -> std::path::PathBuf {
    match value.strip_prefix("//") {
        Some(rest) => root_path.join(rest),
        None => std::path::PathBuf::from(value),
    }
}

/// Express `path` relative to `dest_dir`, as `../` segments plus a tail.
///
/// Returns `.` when the two name the same directory.
pub fn rebase_path(path: &str, dest_dir: &SourceDir, root_path: &Path) -> String {
    let from = to_system_path(path, root_path);
    let to = to_system_path(dest_dir.as_str(), root_path);
    let rebased = pathdiff::diff_paths(&from, &to).unwrap_or(from);

    let parts: Vec<String> = rebased
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir => Some(String::new()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
