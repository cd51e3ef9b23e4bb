//! Target definitions - what gets built, and what it produces.
//!
//! A Target pairs an [`OutputType`] with the model used to derive its
//! outputs. The pairing is fixed by the constructors: explicit output lists
//! for actions, copies and generated files, a per-source template for
//! `action_foreach`, and nothing for everything else.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::label::Label;
use crate::core::settings::Settings;
use crate::core::source_path::SourceFile;
use crate::substitution::{apply_list_to_sources, ExpansionError, SubstitutionList};

/// The kind of target declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    Group,
    Executable,
    SharedLibrary,
    LoadableModule,
    StaticLibrary,
    SourceSet,
    Copy,
    Action,
    #[serde(rename = "action_foreach")]
    ActionForEach,
    GeneratedFile,
}

impl OutputType {
    /// The declaring function's name, as written in build descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Group => "group",
            OutputType::Executable => "executable",
            OutputType::SharedLibrary => "shared_library",
            OutputType::LoadableModule => "loadable_module",
            OutputType::StaticLibrary => "static_library",
            OutputType::SourceSet => "source_set",
            OutputType::Copy => "copy",
            OutputType::Action => "action",
            OutputType::ActionForEach => "action_foreach",
            OutputType::GeneratedFile => "generated_file",
        }
    }

    /// Whether the outputs depend on toolchain rules (compiled kinds).
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            OutputType::Executable
                | OutputType::SharedLibrary
                | OutputType::LoadableModule
                | OutputType::StaticLibrary
        )
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a target's outputs are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutputs {
    /// Outputs listed verbatim
    Explicit(Vec<SourceFile>),
    /// One expansion of `template` per source
    PerSource {
        sources: Vec<SourceFile>,
        template: SubstitutionList,
    },
    /// Outputs depend on information not available during file evaluation
    None,
}

/// Error computing a target's outputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    #[error("outputs of {output_type} target {label} cannot be computed")]
    UnsupportedKind { label: Label, output_type: OutputType },

    #[error(transparent)]
    Expansion(#[from] ExpansionError),
}

/// A declared buildable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    label: Label,
    output_type: OutputType,
    outputs: TargetOutputs,
}

impl Target {
    /// An `action` target with the given output files.
    pub fn action(label: Label, outputs: Vec<SourceFile>) -> Self {
        Self::explicit(label, OutputType::Action, outputs)
    }

    /// A `copy` target with the given output files.
    pub fn copy(label: Label, outputs: Vec<SourceFile>) -> Self {
        Self::explicit(label, OutputType::Copy, outputs)
    }

    /// A `generated_file` target with the given output files.
    pub fn generated_file(label: Label, outputs: Vec<SourceFile>) -> Self {
        Self::explicit(label, OutputType::GeneratedFile, outputs)
    }

    /// An `action_foreach` target running once per source.
    pub fn action_foreach(label: Label, sources: Vec<SourceFile>, template: SubstitutionList) -> Self {
        Target {
            label,
            output_type: OutputType::ActionForEach,
            outputs: TargetOutputs::PerSource { sources, template },
        }
    }

    /// A target whose outputs are not computable here (binaries, source
    /// sets and groups).
    ///
    /// Passing one of the output-producing kinds gives it an empty
    /// explicit output list.
    pub fn opaque(label: Label, output_type: OutputType) -> Self {
        let outputs = match output_type {
            OutputType::Action | OutputType::Copy | OutputType::GeneratedFile => {
                TargetOutputs::Explicit(Vec::new())
            }
            OutputType::ActionForEach => TargetOutputs::PerSource {
                sources: Vec::new(),
                template: SubstitutionList::default(),
            },
            _ => TargetOutputs::None,
        };
        Target {
            label,
            output_type,
            outputs,
        }
    }

    fn explicit(label: Label, output_type: OutputType, outputs: Vec<SourceFile>) -> Self {
        Target {
            label,
            output_type,
            outputs: TargetOutputs::Explicit(outputs),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    pub fn outputs(&self) -> &TargetOutputs {
        &self.outputs
    }

    /// Compute the files this target will produce, in declared order.
    ///
    /// Action, copy and generated_file targets return their outputs
    /// verbatim. An action_foreach target expands its template for each
    /// source. Duplicates are kept in both cases.
    pub fn compute_outputs(&self, settings: &Settings) -> Result<Vec<SourceFile>, OutputError> {
        match (self.output_type, &self.outputs) {
            (
                OutputType::Action | OutputType::Copy | OutputType::GeneratedFile,
                TargetOutputs::Explicit(outputs),
            ) => Ok(outputs.clone()),
            (OutputType::ActionForEach, TargetOutputs::PerSource { sources, template }) => {
                Ok(apply_list_to_sources(
                    settings,
                    Some(self.label.dir()),
                    template,
                    sources,
                )?)
            }
            _ => Err(OutputError::UnsupportedKind {
                label: self.label.clone(),
                output_type: self.output_type,
            }),
        }
    }
}
