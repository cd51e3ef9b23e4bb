//! Sequential evaluation of one build description.
//!
//! A description file is an ordered list of statements: item declarations
//! and built-in function calls. Statements run strictly in order against a
//! registry owned by this evaluation, so a call only sees the items
//! declared above it.
//!
//! ```toml
//! path = "//foo/BUILD.gn"
//!
//! [[statement]]
//! op = "declare"
//! type = "action_foreach"
//! name = "my_action"
//! sources = ["a.idl", "b.idl"]
//! outputs = ["{{source_gen_dir}}/{{source_name_part}}.h"]
//!
//! [[statement]]
//! op = "call"
//! function = "get_target_outputs"
//! args = [":my_action"]
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use toml::Spanned;

use crate::core::item::{Config, Item, Pool, Toolchain};
use crate::core::label::{check_name, Label, LabelError};
use crate::core::registry::ItemRegistry;
use crate::core::scope::EvalContext;
use crate::core::settings::Settings;
use crate::core::source_path::{SourceDir, SourceFile};
use crate::core::target::{OutputType, Target};
use crate::core::value::{Location, Value, ValueKind};
use crate::functions::{self, ErrorKind, EvalError};
use crate::substitution::{SubstitutionList, SubstitutionPattern};

/// A parsed description file.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildFile {
    /// Source path of the file; its directory anchors relative names
    #[serde(default)]
    pub path: Option<String>,

    /// Statements with their byte spans in the source text
    #[serde(default, rename = "statement")]
    pub statements: Vec<Spanned<Statement>>,
}

/// One statement of a description file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Statement {
    Declare(Declaration),
    Call(Call),
}

/// Kinds of item a description can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationType {
    Action,
    #[serde(rename = "action_foreach")]
    ActionForEach,
    Copy,
    GeneratedFile,
    SourceSet,
    Group,
    Executable,
    SharedLibrary,
    LoadableModule,
    StaticLibrary,
    Config,
    Toolchain,
    Pool,
}

impl DeclarationType {
    /// The target output type, or `None` for non-target items.
    pub fn output_type(self) -> Option<OutputType> {
        Some(match self {
            DeclarationType::Action => OutputType::Action,
            DeclarationType::ActionForEach => OutputType::ActionForEach,
            DeclarationType::Copy => OutputType::Copy,
            DeclarationType::GeneratedFile => OutputType::GeneratedFile,
            DeclarationType::SourceSet => OutputType::SourceSet,
            DeclarationType::Group => OutputType::Group,
            DeclarationType::Executable => OutputType::Executable,
            DeclarationType::SharedLibrary => OutputType::SharedLibrary,
            DeclarationType::LoadableModule => OutputType::LoadableModule,
            DeclarationType::StaticLibrary => OutputType::StaticLibrary,
            DeclarationType::Config | DeclarationType::Toolchain | DeclarationType::Pool => {
                return None
            }
        })
    }
}

/// `op = "declare"`
#[derive(Debug, Clone, Deserialize)]
pub struct Declaration {
    #[serde(rename = "type")]
    pub item_type: DeclarationType,
    pub name: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Pool depth
    #[serde(default)]
    pub depth: Option<u32>,
}

/// `op = "call"`
#[derive(Debug, Clone, Deserialize)]
pub struct Call {
    pub function: String,
    #[serde(default)]
    pub args: Vec<toml::Value>,
}

/// The value returned by one call statement.
#[derive(Debug, Clone)]
pub struct CallResult {
    pub function: String,
    pub location: Location,
    pub value: Value,
}

/// Everything produced by evaluating one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file: SourceFile,
    /// Results of the calls that ran, in order
    pub results: Vec<CallResult>,
    /// The error that aborted evaluation, if any
    pub error: Option<EvalError>,
    /// Items declared before evaluation stopped
    pub items: ItemRegistry,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Query the outputs of `label` against the finished file.
    pub fn target_outputs(&self, settings: &Settings, label: &str) -> Result<Value, EvalError> {
        let dir = self.file.dir();
        let ctx = EvalContext::new(settings, &dir).with_items(&self.items);
        let call_site = Location::new(self.file.as_str(), 0, 0);
        functions::run_function(
            &ctx,
            functions::get_target_outputs::NAME,
            &call_site,
            &[Value::string(label, call_site.clone())],
        )
    }
}

/// Evaluates statements of one file against its own registry.
pub struct FileEvaluator<'a> {
    settings: &'a Settings,
    file: SourceFile,
    dir: SourceDir,
    items: ItemRegistry,
}

impl<'a> FileEvaluator<'a> {
    pub fn new(settings: &'a Settings, file: SourceFile) -> Self {
        let dir = file.dir();
        FileEvaluator {
            settings,
            file,
            dir,
            items: ItemRegistry::new(),
        }
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    /// Declare an item at `location`.
    pub fn declare(&mut self, decl: &Declaration, location: &Location) -> Result<(), EvalError> {
        let fail = |kind| EvalError::new(kind, location.clone());

        check_name(&decl.name).map_err(|reason| {
            fail(ErrorKind::LabelSyntax(LabelError {
                input: format!("\"{}\"", decl.name),
                reason,
            }))
        })?;
        let label = Label::with_toolchain(self.dir.clone(), &decl.name, self.settings.toolchain_label());

        if self.items.find(&label).is_some() {
            return Err(fail(ErrorKind::DuplicateDefinition {
                label: label.user_visible_name(false),
            }));
        }

        let item = match decl.item_type.output_type() {
            Some(output_type) => Item::Target(self.make_target(label, output_type, decl, location)?),
            None => match decl.item_type {
                DeclarationType::Config => Item::Config(Config { label }),
                DeclarationType::Toolchain => Item::Toolchain(Toolchain { label }),
                _ => Item::Pool(Pool {
                    label,
                    depth: decl.depth.unwrap_or(0),
                }),
            },
        };

        tracing::debug!(
            "declared {} {} ({} item(s) so far)",
            item.item_type_name(),
            item.label(),
            self.items.len() + 1
        );
        self.items.append(item);
        Ok(())
    }

    fn make_target(
        &self,
        label: Label,
        output_type: OutputType,
        decl: &Declaration,
        location: &Location,
    ) -> Result<Target, EvalError> {
        let target = match output_type {
            OutputType::ActionForEach => {
                let template = SubstitutionList::parse(&decl.outputs)
                    .map_err(|e| EvalError::new(ErrorKind::Pattern(e), location.clone()))?;
                Target::action_foreach(label, self.resolve_files(&decl.sources, location)?, template)
            }
            OutputType::Action | OutputType::Copy | OutputType::GeneratedFile => {
                for output in &decl.outputs {
                    self.reject_expansion(output, location)?;
                }
                let outputs = self.resolve_files(&decl.outputs, location)?;
                match output_type {
                    OutputType::Action => Target::action(label, outputs),
                    OutputType::Copy => Target::copy(label, outputs),
                    _ => Target::generated_file(label, outputs),
                }
            }
            _ => Target::opaque(label, output_type),
        };
        Ok(target)
    }

    fn reject_expansion(&self, output: &str, location: &Location) -> Result<(), EvalError> {
        let pattern = SubstitutionPattern::parse(output)
            .map_err(|e| EvalError::new(ErrorKind::Pattern(e), location.clone()))?;
        if pattern.has_placeholders() {
            return Err(EvalError::new(
                ErrorKind::BadPath {
                    path: output.to_string(),
                    reason: "source expansions are only allowed in action_foreach outputs"
                        .to_string(),
                },
                location.clone(),
            ));
        }
        Ok(())
    }

    fn resolve_files(&self, paths: &[String], location: &Location) -> Result<Vec<SourceFile>, EvalError> {
        let root_path = self.settings.build_settings().root_path();
        paths
            .iter()
            .map(|p| {
                self.dir.resolve_relative_file(p, root_path).map_err(|e| {
                    EvalError::new(
                        ErrorKind::BadPath {
                            path: p.clone(),
                            reason: e.to_string(),
                        },
                        location.clone(),
                    )
                })
            })
            .collect()
    }

    /// Run a built-in function against the items declared so far.
    pub fn call(&self, call: &Call, location: &Location) -> Result<Value, EvalError> {
        let args = call
            .args
            .iter()
            .map(|arg| toml_to_value(arg, location))
            .collect::<Result<Vec<_>, _>>()?;
        let ctx = EvalContext::new(self.settings, &self.dir).with_items(&self.items);
        functions::run_function(&ctx, &call.function, location, &args)
    }

    /// Run all statements, stopping at the first error.
    ///
    /// `text` is the source the statements were parsed from; each statement
    /// is located at the line its table starts on.
    pub fn run(mut self, statements: &[Spanned<Statement>], text: &str) -> FileOutcome {
        let mut results = Vec::new();
        let mut error = None;

        for statement in statements {
            let line = line_at(text, statement.span().start);
            let location = Location::new(self.file.as_str(), line, 0);
            let step = match statement.get_ref() {
                Statement::Declare(decl) => self.declare(decl, &location),
                Statement::Call(call) => self.call(call, &location).map(|value| {
                    results.push(CallResult {
                        function: call.function.clone(),
                        location: location.clone(),
                        value,
                    });
                }),
            };
            if let Err(e) = step {
                tracing::debug!("evaluation of {} stopped: {}", self.file, e);
                error = Some(e);
                break;
            }
        }

        FileOutcome {
            file: self.file,
            results,
            error,
            items: self.items,
        }
    }
}

fn toml_to_value(value: &toml::Value, location: &Location) -> Result<Value, EvalError> {
    let kind = match value {
        toml::Value::String(s) => ValueKind::String(s.clone()),
        toml::Value::Integer(i) => ValueKind::Integer(*i),
        toml::Value::Boolean(b) => ValueKind::Boolean(*b),
        toml::Value::Array(items) => ValueKind::List(
            items
                .iter()
                .map(|v| toml_to_value(v, location))
                .collect::<Result<_, _>>()?,
        ),
        other => {
            return Err(EvalError::new(
                ErrorKind::WrongType {
                    expected: "a string, integer, boolean or list",
                    found: other.type_str(),
                },
                location.clone(),
            ))
        }
    };
    Ok(Value::new(kind, location.clone()))
}

/// 1-based line containing byte `offset` of `text`.
fn line_at(text: &str, offset: usize) -> u32 {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() as u32 + 1
}

/// Parse a description from text.
pub fn parse_build_file(text: &str) -> Result<BuildFile> {
    toml::from_str(text).context("invalid build description")
}

/// Source path for a description file on disk.
///
/// An explicit `path` wins; otherwise the file's location below the
/// repository root is used.
fn source_file_for(build_file: &BuildFile, disk_path: &Path, settings: &Settings) -> Result<SourceFile> {
    if let Some(ref path) = build_file.path {
        return SourceFile::new(path)
            .with_context(|| format!("invalid `path` in {}", disk_path.display()));
    }

    let root = settings.build_settings().root_path();
    let absolute = std::fs::canonicalize(disk_path).unwrap_or_else(|_| disk_path.to_path_buf());
    let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    match absolute.strip_prefix(&root) {
        Ok(rel) => {
            let rel = rel.to_string_lossy().replace('\\', "/");
            Ok(SourceFile::new(&format!("//{}", rel))?)
        }
        Err(_) => bail!(
            "{} is outside the source root {}; set `path` in the file",
            disk_path.display(),
            root.display()
        ),
    }
}

/// Evaluate description text as if it lived at `file`.
pub fn evaluate_source(text: &str, file: SourceFile, settings: &Settings) -> Result<FileOutcome> {
    let build_file = parse_build_file(text)?;
    Ok(FileEvaluator::new(settings, file).run(&build_file.statements, text))
}

/// Load and evaluate a description file from disk.
pub fn evaluate_file(path: &Path, settings: &Settings) -> Result<FileOutcome> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read build description: {}", path.display()))?;
    let build_file = toml::from_str::<BuildFile>(&text)
        .with_context(|| format!("failed to parse build description: {}", path.display()))?;
    let file = source_file_for(&build_file, path, settings)?;

    tracing::info!("Evaluating {} ({} statements)", file, build_file.statements.len());
    Ok(FileEvaluator::new(settings, file).run(&build_file.statements, &text))
}
