//! Compiled substitution patterns.

use thiserror::Error;

use super::types::SubstitutionType;

/// Error compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown substitution pattern in \"{pattern}\": found a {{{{ at offset {offset} and did not find a known substitution following it")]
    UnknownPlaceholder { pattern: String, offset: usize },

    #[error("{placeholder} is not valid in \"{pattern}\" because there is no target")]
    RequiresTarget {
        pattern: String,
        placeholder: SubstitutionType,
    },
}

/// One piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(SubstitutionType),
}

/// A template such as `//out/gen/{{source_name_part}}.h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPattern {
    text: String,
    segments: Vec<Segment>,
    required_types: Vec<SubstitutionType>,
}

impl SubstitutionPattern {
    /// Compile a pattern string.
    ///
    /// Text without `{{` is literal. Every `{{` must open a known
    /// placeholder closed by `}}`.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        let mut required_types = Vec::new();
        let mut cur = 0;

        while let Some(rel) = text[cur..].find("{{") {
            let open = cur + rel;
            if open > cur {
                segments.push(Segment::Literal(text[cur..open].to_string()));
            }

            let unknown = || PatternError::UnknownPlaceholder {
                pattern: text.to_string(),
                offset: open,
            };
            let name_start = open + 2;
            let close = text[name_start..].find("}}").ok_or_else(unknown)? + name_start;
            let ty = SubstitutionType::from_name(&text[name_start..close]).ok_or_else(unknown)?;

            segments.push(Segment::Placeholder(ty));
            if !required_types.contains(&ty) {
                required_types.push(ty);
            }
            cur = close + 2;
        }
        if cur < text.len() {
            segments.push(Segment::Literal(text[cur..].to_string()));
        }

        Ok(SubstitutionPattern {
            text: text.to_string(),
            segments,
            required_types,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholders used, in first-use order.
    pub fn required_types(&self) -> &[SubstitutionType] {
        &self.required_types
    }

    pub fn has_placeholders(&self) -> bool {
        !self.required_types.is_empty()
    }
}

/// An ordered list of patterns; each source expands once per pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionList {
    patterns: Vec<SubstitutionPattern>,
}

impl SubstitutionList {
    pub fn parse<S: AsRef<str>>(texts: &[S]) -> Result<Self, PatternError> {
        let patterns = texts
            .iter()
            .map(|t| SubstitutionPattern::parse(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SubstitutionList { patterns })
    }

    pub fn patterns(&self) -> &[SubstitutionPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Reject placeholders that only make sense for a target.
    pub fn validate_without_target(&self) -> Result<(), PatternError> {
        for pattern in &self.patterns {
            if let Some(ty) = pattern.required_types().iter().find(|t| t.requires_target()) {
                return Err(PatternError::RequiresTarget {
                    pattern: pattern.as_str().to_string(),
                    placeholder: *ty,
                });
            }
        }
        Ok(())
    }
}
