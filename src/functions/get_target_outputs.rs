//! `get_target_outputs()` - outputs of a target declared earlier in the file.

use crate::core::label::Label;
use crate::core::scope::EvalContext;
use crate::core::target::OutputError;
use crate::core::value::{Location, Value};

use super::errors::{ErrorKind, EvalError};

pub const NAME: &str = "get_target_outputs";

pub const HELP_SHORT: &str = "get_target_outputs: [file list] Get the list of outputs from a target.";

pub const HELP: &str = r#"get_target_outputs: [file list] Get the list of outputs from a target.

  get_target_outputs(target_label)

  Returns a list of output files for the named target. The named target must
  have been previously defined in the current file before this function is
  called. Targets in other files cannot be referenced because files have no
  defined evaluation order, and targets defined after the call do not exist
  yet.

  Only copy, generated_file, action and action_foreach targets are
  supported. The outputs of binary targets depend on the toolchain
  definition, which is not necessarily loaded when the call runs, and source
  sets and groups have no useful output file.

Return value

  The names in the resulting list are absolute file paths (normally like
  "//out/Debug/bar.exe", depending on the build directory).

  action, copy, and generated_file targets: the files listed in the
  "outputs" variable of the target, in order.

  action_foreach targets: the result of applying the output template to the
  sources (see "gnquery help source_expansion"). This is the same result,
  with guaranteed absolute paths, that process_file_template returns for
  those inputs.

Example

  # Say this action generates a bunch of C source files.
  action_foreach("my_action") {
    sources = [ ... ]
    outputs = [ ... ]
  }

  # Compile the resulting source files into a source set.
  source_set("my_lib") {
    sources = get_target_outputs(":my_action")
  }
"#;

/// Run `get_target_outputs(label)` at `call_site`.
///
/// Only reads `ctx`; the registry and its targets are left untouched.
pub fn run(ctx: &EvalContext<'_>, call_site: &Location, args: &[Value]) -> Result<Value, EvalError> {
    let fail = |kind| EvalError::new(kind, call_site.clone());

    let [arg] = args else {
        return Err(fail(ErrorKind::ArgumentCount {
            function: NAME,
            expected: 1,
            found: args.len(),
        }));
    };

    let label = Label::resolve(ctx.source_dir(), ctx.root_path(), ctx.toolchain_label(), arg)
        .map_err(|e| EvalError::new(ErrorKind::LabelSyntax(e), arg.origin().clone()))?;

    let Some(items) = ctx.items() else {
        return Err(fail(ErrorKind::Context { function: NAME }));
    };

    let item = items.find(&label).ok_or_else(|| {
        fail(ErrorKind::NotFound {
            label: label.user_visible_name(false),
        })
    })?;

    let target = item.as_target().ok_or_else(|| {
        fail(ErrorKind::TypeMismatch {
            label: label.user_visible_name(false),
            item_type: item.item_type_name().to_string(),
        })
    })?;

    tracing::debug!(
        "get_target_outputs: {} is a {} ({} item(s) visible)",
        label,
        target.output_type(),
        items.len()
    );

    let files = target
        .compute_outputs(ctx.settings())
        .map_err(|e| match e {
            OutputError::UnsupportedKind { label, output_type } => EvalError::new(
                ErrorKind::UnsupportedKind {
                    label: label.user_visible_name(false),
                    output_type: output_type.to_string(),
                },
                arg.origin().clone(),
            ),
            OutputError::Expansion(e) => fail(ErrorKind::Expansion(e)),
        })?;

    let list = files
        .iter()
        .map(|file| Value::string(file.as_str(), call_site.clone()))
        .collect();
    Ok(Value::list(list, call_site.clone()))
}
