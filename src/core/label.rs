//! Labels - WHICH item (directory + name + toolchain).
//!
//! A label is the canonical identity of anything declared in a build
//! description. Two labels are equal only when directory, name and
//! toolchain all match, so resolution must be exactly reproducible.
//!
//! Accepted syntax:
//!
//! ```text
//! :name                     name in the current directory
//! //dir:name                source-absolute
//! dir/sub:name, ../x:name   relative to the current directory
//! //dir/sub                 implicit name, same as //dir/sub:sub
//! //dir:name(//tc:tc_name)  explicit toolchain
//! ```

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::core::source_path::{PathError, SourceDir};
use crate::core::value::Value;

/// Why a label expression could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelErrorReason {
    #[error("expected a string, got a {type_name}")]
    NotAString { type_name: &'static str },

    #[error("empty label")]
    Empty,

    #[error("bad toolchain name, expected `(//dir:name)` at the end")]
    BadToolchain,

    #[error("the toolchain label has its own toolchain")]
    ToolchainHasToolchain,

    #[error("the name after `:` is empty")]
    EmptyName,

    #[error("no name could be derived from the directory")]
    NoName,

    #[error("the name contains an invalid character `{ch}`")]
    InvalidCharacter { ch: char },

    #[error("`{name}` is not a valid name")]
    ReservedName { name: String },

    #[error("path goes above the source root")]
    EscapesRoot,

    #[error("{0}")]
    Path(PathError),
}

/// A label expression that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid label {input}: {reason}")]
pub struct LabelError {
    /// The offending expression, rendered as it was written
    pub input: String,
    pub reason: LabelErrorReason,
}

/// Canonical identifier of a declared item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    dir: SourceDir,
    name: String,
    toolchain: Option<Box<Label>>,
}

impl Label {
    /// Create a label with no toolchain qualifier.
    pub fn new(dir: SourceDir, name: impl Into<String>) -> Self {
        Label {
            dir,
            name: name.into(),
            toolchain: None,
        }
    }

    /// Create a label qualified by `toolchain`.
    ///
    /// Only the toolchain's own directory and name are kept.
    pub fn with_toolchain(dir: SourceDir, name: impl Into<String>, toolchain: &Label) -> Self {
        Label {
            dir,
            name: name.into(),
            toolchain: Some(Box::new(toolchain.without_toolchain())),
        }
    }

    pub fn dir(&self) -> &SourceDir {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn toolchain(&self) -> Option<&Label> {
        self.toolchain.as_deref()
    }

    /// This label with its toolchain qualifier dropped.
    pub fn without_toolchain(&self) -> Label {
        Label::new(self.dir.clone(), self.name.clone())
    }

    /// The name shown to users: `//dir:name`, optionally followed by
    /// `(//tc:name)`.
    pub fn user_visible_name(&self, include_toolchain: bool) -> String {
        let mut out = format!("{}:{}", self.dir.without_last_slash_for_label(), self.name);
        if include_toolchain {
            if let Some(tc) = &self.toolchain {
                out.push('(');
                out.push_str(&tc.user_visible_name(false));
                out.push(')');
            }
        }
        out
    }

    /// Resolve a label expression against the evaluation context.
    ///
    /// `current_dir` anchors relative paths, `root_path` lets system-absolute
    /// paths inside the repository become source-absolute, and
    /// `current_toolchain` fills in a missing toolchain qualifier.
    pub fn resolve(
        current_dir: &SourceDir,
        root_path: &Path,
        current_toolchain: &Label,
        input: &Value,
    ) -> Result<Label, LabelError> {
        let Some(text) = input.as_str() else {
            return Err(LabelError {
                input: input.to_string(),
                reason: LabelErrorReason::NotAString {
                    type_name: input.type_name(),
                },
            });
        };

        resolve_str(current_dir, root_path, Some(current_toolchain), text).map_err(|reason| {
            LabelError {
                input: input.to_string(),
                reason,
            }
        })
    }

    /// Resolve a label that names a toolchain (or is otherwise used
    /// without one), such as `//build/toolchain:clang`.
    pub fn resolve_toolchain(current_dir: &SourceDir, root_path: &Path, input: &str) -> Result<Label, LabelError> {
        resolve_str(current_dir, root_path, None, input)
            .and_then(|label| match label.toolchain {
                Some(_) => Err(LabelErrorReason::ToolchainHasToolchain),
                None => Ok(label),
            })
            .map_err(|reason| LabelError {
                input: format!("\"{}\"", input),
                reason,
            })
    }
}

impl SourceDir {
    /// `//foo/bar` for `//foo/bar/`, but `//` for the root.
    fn without_last_slash_for_label(&self) -> &str {
        let s = self.as_str();
        if s == "//" || s == "/" {
            s
        } else {
            &s[..s.len() - 1]
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_visible_name(true))
    }
}

fn resolve_str(
    current_dir: &SourceDir,
    root_path: &Path,
    current_toolchain: Option<&Label>,
    input: &str,
) -> Result<Label, LabelErrorReason> {
    if input.is_empty() {
        return Err(LabelErrorReason::Empty);
    }

    let (body, toolchain_part) = split_toolchain(input)?;

    let (location, explicit_name) = match body.find(':') {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let dir = if location.is_empty() {
        current_dir.clone()
    } else {
        current_dir
            .resolve_relative_dir(location, root_path)
            .map_err(|e| match e {
                PathError::EscapesRoot { .. } => LabelErrorReason::EscapesRoot,
                other => LabelErrorReason::Path(other),
            })?
    };

    let name = match explicit_name {
        Some("") => return Err(LabelErrorReason::EmptyName),
        Some(name) => name.to_string(),
        None if location.is_empty() => return Err(LabelErrorReason::NoName),
        None => dir
            .last_component()
            .ok_or(LabelErrorReason::NoName)?
            .to_string(),
    };
    check_name(&name)?;

    let toolchain = match toolchain_part {
        Some(tc) => Some(resolve_str(current_dir, root_path, None, tc)?),
        None => current_toolchain.map(Label::without_toolchain),
    };

    Ok(Label {
        dir,
        name,
        toolchain: toolchain.map(Box::new),
    })
}

/// Check a bare item name, as given to a declaration.
///
/// Names may not contain path or label separators, toolchain parentheses
/// or whitespace, and may not be `.` or `..`.
pub fn check_name(name: &str) -> Result<(), LabelErrorReason> {
    if name.is_empty() {
        return Err(LabelErrorReason::EmptyName);
    }
    if let Some(ch) = name
        .chars()
        .find(|c| matches!(c, '/' | ':' | '(' | ')') || c.is_whitespace())
    {
        return Err(LabelErrorReason::InvalidCharacter { ch });
    }
    if name == "." || name == ".." {
        return Err(LabelErrorReason::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Split `body(toolchain)` into its two parts.
fn split_toolchain(input: &str) -> Result<(&str, Option<&str>), LabelErrorReason> {
    let Some(open) = input.find('(') else {
        if input.contains(')') {
            return Err(LabelErrorReason::BadToolchain);
        }
        return Ok((input, None));
    };

    if !input.ends_with(')') || input.len() < open + 2 {
        return Err(LabelErrorReason::BadToolchain);
    }
    let inner = &input[open + 1..input.len() - 1];
    if inner.is_empty() {
        return Err(LabelErrorReason::BadToolchain);
    }
    if inner.contains('(') || inner.contains(')') {
        return Err(LabelErrorReason::ToolchainHasToolchain);
    }
    Ok((&input[..open], Some(inner)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Location;

    fn toolchain() -> Label {
        Label::new(SourceDir::new("//toolchain/").unwrap(), "default")
    }

    fn resolve(dir: &str, input: &str) -> Result<Label, LabelError> {
        Label::resolve(
            &SourceDir::new(dir).unwrap(),
            Path::new("/src/proj"),
            &toolchain(),
            &Value::string(input, Location::default()),
        )
    }

    #[test]
    fn test_relative_name_uses_current_dir() {
        let label = resolve("//foo/", ":bar").unwrap();
        assert_eq!(label.dir().as_str(), "//foo/");
        assert_eq!(label.name(), "bar");
        assert_eq!(label.toolchain(), Some(&toolchain()));
        assert_eq!(label.user_visible_name(false), "//foo:bar");
        assert_eq!(label.to_string(), "//foo:bar(//toolchain:default)");
    }

    #[test]
    fn test_absolute_and_relative_dirs() {
        assert_eq!(resolve("//a/", "//lib:util").unwrap().user_visible_name(false), "//lib:util");
        assert_eq!(resolve("//a/", "sub:x").unwrap().user_visible_name(false), "//a/sub:x");
        assert_eq!(resolve("//a/b/", "../c:x").unwrap().user_visible_name(false), "//a/c:x");
        assert_eq!(resolve("//a/", "/src/proj/d:x").unwrap().user_visible_name(false), "//d:x");
        assert_eq!(resolve("//a/", "//:root").unwrap().user_visible_name(false), "//:root");
    }

    #[test]
    fn test_implicit_name() {
        let label = resolve("//", "//foo/bar").unwrap();
        assert_eq!(label.name(), "bar");
        assert_eq!(label.dir().as_str(), "//foo/bar/");
    }

    #[test]
    fn test_explicit_toolchain() {
        let label = resolve("//", "//lib:util(//toolchain:x)").unwrap();
        let tc = label.toolchain().unwrap();
        assert_eq!(tc.user_visible_name(false), "//toolchain:x");
        assert_ne!(label, resolve("//", "//lib:util").unwrap());
        assert_eq!(label.to_string(), "//lib:util(//toolchain:x)");
    }

    #[test]
    fn test_resolution_is_reproducible() {
        let a = resolve("//foo/", ":bar").unwrap();
        let b = resolve("//", "//foo:bar(//toolchain:default)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_syntax_errors() {
        let reason = |dir: &str, input: &str| resolve(dir, input).unwrap_err().reason;

        assert_eq!(reason("//", ""), LabelErrorReason::Empty);
        assert_eq!(reason("//", "//foo:"), LabelErrorReason::EmptyName);
        assert_eq!(reason("//", "//"), LabelErrorReason::NoName);
        assert_eq!(reason("//", "//foo:bar(//tc:x"), LabelErrorReason::BadToolchain);
        assert_eq!(reason("//", "//foo:bar()"), LabelErrorReason::BadToolchain);
        assert_eq!(reason("//", "//foo:bar)"), LabelErrorReason::BadToolchain);
        assert_eq!(
            reason("//", "//foo:bar(//tc:x(//tc:y))"),
            LabelErrorReason::ToolchainHasToolchain
        );
        assert_eq!(reason("//", "//foo:a:b"), LabelErrorReason::InvalidCharacter { ch: ':' });
        assert_eq!(reason("//a/", "../../x:y"), LabelErrorReason::EscapesRoot);
        assert_eq!(
            reason("//", "//foo:.."),
            LabelErrorReason::ReservedName {
                name: "..".to_string()
            }
        );
    }

    #[test]
    fn test_toolchain_named_dot_dot_rejected() {
        let err = Label::resolve_toolchain(&SourceDir::root(), Path::new("/src/proj"), "//tc:..")
            .unwrap_err();
        assert!(matches!(err.reason, LabelErrorReason::ReservedName { .. }));
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("gen_headers").is_ok());
        assert!(check_name("lib.v2").is_ok());
        assert_eq!(check_name(""), Err(LabelErrorReason::EmptyName));
        assert_eq!(
            check_name("x(//tc:arm)"),
            Err(LabelErrorReason::InvalidCharacter { ch: '(' })
        );
        assert_eq!(check_name("a b"), Err(LabelErrorReason::InvalidCharacter { ch: ' ' }));
        assert!(matches!(check_name("."), Err(LabelErrorReason::ReservedName { .. })));
    }

    #[test]
    fn test_error_keeps_offending_expression() {
        let err = resolve("//", "//foo:").unwrap_err();
        assert_eq!(err.input, "\"//foo:\"");

        let err = Label::resolve(
            &SourceDir::root(),
            Path::new("/src/proj"),
            &toolchain(),
            &Value::list(Vec::new(), Location::default()),
        )
        .unwrap_err();
        assert_eq!(err.reason, LabelErrorReason::NotAString { type_name: "list" });
    }
}
