//! Source expansion - deriving output paths from source paths.
//!
//! A [`SubstitutionPattern`] is a template whose `{{...}}` placeholders
//! name components of a source file. Expanding it against one source is a
//! pure function of the pattern, the source and the toolchain settings.

pub mod pattern;
pub mod types;
pub mod writer;

pub use pattern::{PatternError, Segment, SubstitutionList, SubstitutionPattern};
pub use types::SubstitutionType;
pub use writer::{apply_list_to_sources, apply_pattern_to_source, ExpansionError};

/// Documentation for the placeholder vocabulary, shown by `gnquery help source_expansion`.
pub const SOURCE_EXPANSION_HELP: &str = r#"How source expansion works

  Source expansion computes output file names from input file names. It is
  used for the outputs of action_foreach targets and by
  process_file_template. Each pattern is applied to every source, in order,
  producing one output per source per pattern.

Placeholders

  {{source}}
      The name of the source file including directory, for example
      "//foo/bar/baz.txt".

  {{source_file_part}}
      The file part of the source including the extension, "baz.txt".

  {{source_name_part}}
      The filename part of the source file with no directory or extension,
      "baz".

  {{source_dir}}
      The directory containing the source file with no trailing slash,
      "//foo/bar".

  {{source_root_relative_dir}}
      The path to the source file's directory relative to the source root,
      with no leading "//" or trailing slashes, "foo/bar". A file at the
      root gives ".". A file outside the source root gives a path relative
      to the root, such as "../../usr/include" for /usr/include/x.h.

  {{source_gen_dir}}
      The generated file directory corresponding to the source's directory,
      "//out/Debug/gen/foo/bar".

  {{source_out_dir}}
      The object file directory corresponding to the source's directory,
      "//out/Debug/obj/foo/bar".

  {{source_target_relative}}
      The path to the source file relative to the target's directory, for a
      target in //foo: "bar/baz.txt". Not valid without a target, so
      process_file_template rejects it.

  Patterns that do not expand to an absolute path are placed in the
  toolchain's output directory.

Examples

  Non-varying outputs:
    action("hardcoded_outputs") {
      sources = [ "input1.idl", "input2.idl" ]
      outputs = [ "$target_out_dir/output1.dat",
                  "$target_out_dir/output2.dat" ]
    }
  The outputs in this case are the two literal files given.

  Varying outputs:
    action_foreach("varying_outputs") {
      sources = [ "input1.idl", "input2.idl" ]
      outputs = [ "{{source_gen_dir}}/{{source_name_part}}.h",
                  "{{source_gen_dir}}/{{source_name_part}}.cc" ]
    }
  Performing source expansion will result in the following output names:
    //out/Debug/gen/mydirectory/input1.h
    //out/Debug/gen/mydirectory/input1.cc
    //out/Debug/gen/mydirectory/input2.h
    //out/Debug/gen/mydirectory/input2.cc
"#;
