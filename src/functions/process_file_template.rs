//! `process_file_template()` - source expansion without a target.

use crate::core::scope::EvalContext;
use crate::core::source_path::SourceFile;
use crate::core::value::{Location, Value};
use crate::substitution::{apply_list_to_sources, SubstitutionList};

use super::errors::{ErrorKind, EvalError};

pub const NAME: &str = "process_file_template";

pub const HELP_SHORT: &str =
    "process_file_template: Do template expansion over a list of files.";

pub const HELP: &str = r#"process_file_template: Do template expansion over a list of files.

  process_file_template(source_list, template)

  process_file_template applies a template list to a source file list,
  returning the result of applying each template to each source. This is
  typically used for computing output file names from input files.

  In most cases, get_target_outputs() will give the same result with
  shorter, more maintainable code. This function should only be used when
  that function can't be used (like there's no target or the target is
  defined in another build file).

Arguments

  The source_list is a list of file names.

  The template can be a string or a list. If it is a list, multiple output
  strings are generated for each input.

  The template should contain source expansions to which each name in the
  source list is applied. See "gnquery help source_expansion".
  {{source_target_relative}} is not allowed because there is no target.

Example

  # In //mydir/BUILD.gn, with build directory //out/Debug/:
  sources = [
    "foo.idl",
    "bar.idl",
  ]
  myoutputs = process_file_template(
      sources,
      [ "{{source_gen_dir}}/{{source_name_part}}.cc",
        "{{source_gen_dir}}/{{source_name_part}}.h" ])

  The result in this case will be:
    [ "//out/Debug/gen/mydir/foo.cc",
      "//out/Debug/gen/mydir/foo.h",
      "//out/Debug/gen/mydir/bar.cc",
      "//out/Debug/gen/mydir/bar.h" ]
"#;

/// Run `process_file_template(sources, template)` at `call_site`.
pub fn run(ctx: &EvalContext<'_>, call_site: &Location, args: &[Value]) -> Result<Value, EvalError> {
    let [sources, template] = args else {
        return Err(EvalError::new(
            ErrorKind::ArgumentCount {
                function: NAME,
                expected: 2,
                found: args.len(),
            },
            call_site.clone(),
        ));
    };

    let template_strings = string_or_list(template)?;
    let list = SubstitutionList::parse(&template_strings)
        .and_then(|list| list.validate_without_target().map(|_| list))
        .map_err(|e| EvalError::new(ErrorKind::Pattern(e), template.origin().clone()))?;

    let files = string_or_list(sources)?
        .iter()
        .map(|s| {
            ctx.source_dir()
                .resolve_relative_file(s, ctx.root_path())
                .map_err(|e| {
                    EvalError::new(
                        ErrorKind::BadPath {
                            path: s.clone(),
                            reason: e.to_string(),
                        },
                        sources.origin().clone(),
                    )
                })
        })
        .collect::<Result<Vec<SourceFile>, _>>()?;

    let expanded = apply_list_to_sources(ctx.settings(), None, &list, &files)
        .map_err(|e| EvalError::new(ErrorKind::Expansion(e), call_site.clone()))?;

    let list = expanded
        .iter()
        .map(|file| Value::string(file.as_str(), call_site.clone()))
        .collect();
    Ok(Value::list(list, call_site.clone()))
}

/// Accept either a single string or a list of strings.
fn string_or_list(value: &Value) -> Result<Vec<String>, EvalError> {
    if let Some(s) = value.as_str() {
        return Ok(vec![s.to_string()]);
    }
    value.to_string_list().ok_or_else(|| {
        EvalError::new(
            ErrorKind::WrongType {
                expected: "a string or a list of strings",
                found: value.type_name(),
            },
            value.origin().clone(),
        )
    })
}
