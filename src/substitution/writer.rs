//! Expansion of patterns against source files.
//!
//! This is the single implementation used both for `action_foreach`
//! outputs and for `process_file_template`, so the two always agree.

use thiserror::Error;

use crate::core::settings::{BuildDirType, Settings};
use crate::core::source_path::{rebase_path, PathError, SourceDir, SourceFile};

use super::pattern::{Segment, SubstitutionList, SubstitutionPattern};
use super::types::SubstitutionType;

/// An expansion whose result is not a valid file path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expanding \"{pattern}\" for {source_file} gave `{expanded}`: {reason}")]
pub struct ExpansionError {
    pub pattern: String,
    pub source_file: String,
    pub expanded: String,
    pub reason: PathError,
}

/// The value of one placeholder for `source`.
///
/// `target_dir` is the directory of the target owning the pattern; without
/// one, `{{source_target_relative}}` is relative to the source root.
pub fn source_substitution(
    ty: SubstitutionType,
    settings: &Settings,
    target_dir: Option<&SourceDir>,
    source: &SourceFile,
) -> String {
    let root_path = settings.build_settings().root_path();
    match ty {
        SubstitutionType::Source => source.as_str().to_string(),
        SubstitutionType::SourceFilePart => source.name().to_string(),
        SubstitutionType::SourceNamePart => source.name_no_extension().to_string(),
        SubstitutionType::SourceDir => source.dir().without_last_slash(),
        SubstitutionType::SourceRootRelativeDir => {
            rebase_path(&source.dir().without_last_slash(), &SourceDir::root(), root_path)
        }
        SubstitutionType::SourceGenDir => settings
            .sub_build_dir(&source.dir(), BuildDirType::Gen)
            .without_last_slash(),
        SubstitutionType::SourceOutDir => settings
            .sub_build_dir(&source.dir(), BuildDirType::Obj)
            .without_last_slash(),
        SubstitutionType::SourceTargetRelative => {
            let root = SourceDir::root();
            rebase_path(source.as_str(), target_dir.unwrap_or(&root), root_path)
        }
    }
}

/// Expand `pattern` for `source` into a plain string.
pub fn apply_pattern_to_source_as_string(
    settings: &Settings,
    target_dir: Option<&SourceDir>,
    pattern: &SubstitutionPattern,
    source: &SourceFile,
) -> String {
    let mut out = String::new();
    for segment in pattern.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(ty) => {
                out.push_str(&source_substitution(*ty, settings, target_dir, source))
            }
        }
    }
    out
}

/// Expand `pattern` for `source` into an absolute file.
///
/// Relative results land in the toolchain's output directory.
pub fn apply_pattern_to_source(
    settings: &Settings,
    target_dir: Option<&SourceDir>,
    pattern: &SubstitutionPattern,
    source: &SourceFile,
) -> Result<SourceFile, ExpansionError> {
    let expanded = apply_pattern_to_source_as_string(settings, target_dir, pattern, source);
    let out_dir = settings.build_dir(BuildDirType::ToolchainRoot);
    out_dir
        .resolve_relative_file(&expanded, settings.build_settings().root_path())
        .map_err(|reason| ExpansionError {
            pattern: pattern.as_str().to_string(),
            source_file: source.as_str().to_string(),
            expanded,
            reason,
        })
}

/// Expand every pattern of `list` for every source.
///
/// Results are grouped by source in input order, then by pattern order.
/// Duplicates are kept.
pub fn apply_list_to_sources(
    settings: &Settings,
    target_dir: Option<&SourceDir>,
    list: &SubstitutionList,
    sources: &[SourceFile],
) -> Result<Vec<SourceFile>, ExpansionError> {
    let mut result = Vec::with_capacity(sources.len() * list.len());
    for source in sources {
        for pattern in list.patterns() {
            result.push(apply_pattern_to_source(settings, target_dir, pattern, source)?);
        }
    }
    tracing::debug!(
        "expanded {} pattern(s) over {} source(s) into {} output(s)",
        list.len(),
        sources.len(),
        result.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{default_settings, secondary_settings};

    fn file(s: &str) -> SourceFile {
        SourceFile::new(s).unwrap()
    }

    fn expand(ty: SubstitutionType, source: &str) -> String {
        let target_dir = SourceDir::new("//foo/").unwrap();
        source_substitution(ty, &default_settings(), Some(&target_dir), &file(source))
    }

    #[test]
    fn test_placeholder_values() {
        let src = "//foo/bar/baz.txt";
        assert_eq!(expand(SubstitutionType::Source, src), "//foo/bar/baz.txt");
        assert_eq!(expand(SubstitutionType::SourceFilePart, src), "baz.txt");
        assert_eq!(expand(SubstitutionType::SourceNamePart, src), "baz");
        assert_eq!(expand(SubstitutionType::SourceDir, src), "//foo/bar");
        assert_eq!(expand(SubstitutionType::SourceRootRelativeDir, src), "foo/bar");
        assert_eq!(expand(SubstitutionType::SourceGenDir, src), "//out/Debug/gen/foo/bar");
        assert_eq!(expand(SubstitutionType::SourceOutDir, src), "//out/Debug/obj/foo/bar");
        assert_eq!(expand(SubstitutionType::SourceTargetRelative, src), "bar/baz.txt");
    }

    #[test]
    fn test_root_level_source() {
        assert_eq!(expand(SubstitutionType::SourceDir, "//a.c"), "//.");
        assert_eq!(expand(SubstitutionType::SourceRootRelativeDir, "//a.c"), ".");
        assert_eq!(expand(SubstitutionType::SourceGenDir, "//a.c"), "//out/Debug/gen");
    }

    #[test]
    fn test_out_of_tree_source() {
        assert_eq!(
            expand(SubstitutionType::SourceRootRelativeDir, "/usr/x/y.h"),
            "../../usr/x"
        );
        assert_eq!(
            expand(SubstitutionType::SourceGenDir, "/usr/x/y.h"),
            "//out/Debug/gen/ABS_PATH/usr/x"
        );
    }

    #[test]
    fn test_secondary_toolchain_gen_dir() {
        let value = source_substitution(
            SubstitutionType::SourceGenDir,
            &secondary_settings("arm"),
            None,
            &file("//foo/a.idl"),
        );
        assert_eq!(value, "//out/Debug/arm/gen/foo");
    }

    #[test]
    fn test_apply_list_preserves_order_and_duplicates() {
        let list = SubstitutionList::parse(&[
            "//out/{{source_name_part}}.h",
            "//out/{{source_name_part}}.cc",
        ])
        .unwrap();
        let sources = vec![file("//x/a.idl"), file("//y/b.idl"), file("//z/a.idl")];
        let outputs = apply_list_to_sources(&default_settings(), None, &list, &sources).unwrap();
        let outputs: Vec<_> = outputs.iter().map(SourceFile::as_str).collect();
        assert_eq!(
            outputs,
            [
                "//out/a.h",
                "//out/a.cc",
                "//out/b.h",
                "//out/b.cc",
                "//out/a.h",
                "//out/a.cc"
            ]
        );
    }

    #[test]
    fn test_relative_result_lands_in_output_dir() {
        let pattern = SubstitutionPattern::parse("{{source_name_part}}.o").unwrap();
        let out = apply_pattern_to_source(&default_settings(), None, &pattern, &file("//foo/a.c"))
            .unwrap();
        assert_eq!(out.as_str(), "//out/Debug/a.o");
    }

    #[test]
    fn test_directory_result_is_an_error() {
        let pattern = SubstitutionPattern::parse("{{source_gen_dir}}/").unwrap();
        let err = apply_pattern_to_source(&default_settings(), None, &pattern, &file("//foo/a.c"))
            .unwrap_err();
        assert_eq!(err.expanded, "//out/Debug/gen/foo/");
    }
}
