//! Description-language values.
//!
//! Every value remembers the [`Location`] it was produced at so that errors
//! about it can point back into the description file.

use std::fmt;

use serde::{Serialize, Serializer};

/// A position in a description file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    /// File the position belongs to (a source path such as `//BUILD.gn`)
    pub file: String,
    /// 1-based line, 0 when unknown
    pub line: u32,
    /// 1-based column, 0 when unknown
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Location {
            file: file.into(),
            line,
            column,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.file.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "<unknown>");
        }
        write!(f, "{}", self.file)?;
        if self.line > 0 {
            write!(f, ":{}", self.line)?;
            if self.column > 0 {
                write!(f, ":{}", self.column)?;
            }
        }
        Ok(())
    }
}

/// The payload of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValueKind {
    None,
    Boolean(bool),
    Integer(i64),
    String(String),
    List(Vec<Value>),
}

/// A value plus the location it originated from.
///
/// Equality compares payloads only.
#[derive(Debug, Clone)]
pub struct Value {
    kind: ValueKind,
    origin: Location,
}

impl Value {
    pub fn new(kind: ValueKind, origin: Location) -> Self {
        Value { kind, origin }
    }

    pub fn string(s: impl Into<String>, origin: Location) -> Self {
        Value::new(ValueKind::String(s.into()), origin)
    }

    pub fn list(items: Vec<Value>, origin: Location) -> Self {
        Value::new(ValueKind::List(items), origin)
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn origin(&self) -> &Location {
        &self.origin
    }

    /// Name of the value's type, as shown in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ValueKind::None => "none",
            ValueKind::Boolean(_) => "boolean",
            ValueKind::Integer(_) => "integer",
            ValueKind::String(_) => "string",
            ValueKind::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match &self.kind {
            ValueKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// Collect a list of strings, or `None` if this is not one.
    pub fn to_string_list(&self) -> Option<Vec<String>> {
        self.as_list()?
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Value {}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.kind.serialize(serializer)
    }
}

/// Renders the value the way it would be written in a description file.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::None => write!(f, "<void>"),
            ValueKind::Boolean(b) => write!(f, "{}", b),
            ValueKind::Integer(i) => write!(f, "{}", i),
            ValueKind::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            ValueKind::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
