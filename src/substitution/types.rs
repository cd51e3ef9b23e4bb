//! The placeholder vocabulary of source expansion.

use std::fmt;

/// A placeholder recognized inside a substitution pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubstitutionType {
    /// `{{source}}` - the source path, `//foo/bar/baz.txt`
    Source,
    /// `{{source_file_part}}` - the file name, `baz.txt`
    SourceFilePart,
    /// `{{source_name_part}}` - the file name without extension, `baz`
    SourceNamePart,
    /// `{{source_dir}}` - the containing directory, `//foo/bar`
    SourceDir,
    /// `{{source_root_relative_dir}}` - the directory relative to `//`, `foo/bar`
    SourceRootRelativeDir,
    /// `{{source_gen_dir}}` - the mirrored gen directory, `//out/Debug/gen/foo/bar`
    SourceGenDir,
    /// `{{source_out_dir}}` - the mirrored obj directory, `//out/Debug/obj/foo/bar`
    SourceOutDir,
    /// `{{source_target_relative}}` - the path relative to the target's directory
    SourceTargetRelative,
}

impl SubstitutionType {
    pub const ALL: [SubstitutionType; 8] = [
        SubstitutionType::Source,
        SubstitutionType::SourceFilePart,
        SubstitutionType::SourceNamePart,
        SubstitutionType::SourceDir,
        SubstitutionType::SourceRootRelativeDir,
        SubstitutionType::SourceGenDir,
        SubstitutionType::SourceOutDir,
        SubstitutionType::SourceTargetRelative,
    ];

    /// The placeholder name without braces.
    pub fn name(self) -> &'static str {
        match self {
            SubstitutionType::Source => "source",
            SubstitutionType::SourceFilePart => "source_file_part",
            SubstitutionType::SourceNamePart => "source_name_part",
            SubstitutionType::SourceDir => "source_dir",
            SubstitutionType::SourceRootRelativeDir => "source_root_relative_dir",
            SubstitutionType::SourceGenDir => "source_gen_dir",
            SubstitutionType::SourceOutDir => "source_out_dir",
            SubstitutionType::SourceTargetRelative => "source_target_relative",
        }
    }

    /// Look up a placeholder by its name (the text between `{{` and `}}`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether expansion needs the owning target's directory.
    pub fn requires_target(self) -> bool {
        matches!(self, SubstitutionType::SourceTargetRelative)
    }
}

impl fmt::Display for SubstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}}}}}", self.name())
    }
}
