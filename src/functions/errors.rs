//! Evaluation error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::label::LabelError;
use crate::core::value::Location;
use crate::substitution::{ExpansionError, PatternError};
use crate::util::diagnostic::Diagnostic;

/// What went wrong while running a built-in function or declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ErrorKind {
    #[error("Expected {}.", argument_count(.expected))]
    #[diagnostic(code(gnquery::eval::argument_count), help("{function}() was called with {found}."))]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{0}")]
    #[diagnostic(code(gnquery::eval::label_syntax))]
    LabelSyntax(LabelError),

    #[error("No targets defined in this context.")]
    #[diagnostic(
        code(gnquery::eval::no_context),
        help("{function}() must be called while a build file is being evaluated.")
    )]
    Context { function: &'static str },

    #[error("Target not found in this context.")]
    #[diagnostic(
        code(gnquery::eval::not_found),
        help("{label}\nwas not found. get_target_outputs() can only be used for targets\npreviously defined in the current file.")
    )]
    NotFound { label: String },

    #[error("Label does not refer to a target.")]
    #[diagnostic(code(gnquery::eval::not_a_target), help("{label}\nrefers to a {item_type}"))]
    TypeMismatch { label: String, item_type: String },

    #[error("Target is not an action, action_foreach, generated_file, or copy.")]
    #[diagnostic(
        code(gnquery::eval::unsupported_kind),
        help("Only these target types are supported by get_target_outputs.")
    )]
    UnsupportedKind { label: String, output_type: String },

    #[error("{0}")]
    #[diagnostic(code(gnquery::eval::bad_output))]
    Expansion(ExpansionError),

    #[error("Expected {expected}, got a {found}.")]
    #[diagnostic(code(gnquery::eval::wrong_type))]
    WrongType { expected: &'static str, found: &'static str },

    #[error("{0}")]
    #[diagnostic(code(gnquery::eval::bad_pattern))]
    Pattern(PatternError),

    #[error("Bad path \"{path}\": {reason}")]
    #[diagnostic(code(gnquery::eval::bad_path))]
    BadPath { path: String, reason: String },

    #[error("Unknown function.")]
    #[diagnostic(code(gnquery::eval::unknown_function), help("The function \"{name}\" is not a built-in function."))]
    UnknownFunction { name: String },

    #[error("Duplicate definition.")]
    #[diagnostic(
        code(gnquery::eval::duplicate_definition),
        help("The item\n  {label}\nwas already defined earlier in this file.")
    )]
    DuplicateDefinition { label: String },
}

fn argument_count(expected: &usize) -> String {
    match expected {
        1 => "one argument".to_string(),
        2 => "two arguments".to_string(),
        n => format!("{} arguments", n),
    }
}

/// An [`ErrorKind`] plus the place it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {kind}")]
pub struct EvalError {
    pub kind: ErrorKind,
    pub location: Location,
}

impl EvalError {
    pub fn new(kind: ErrorKind, location: Location) -> Self {
        EvalError { kind, location }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The secondary help text, if any.
    pub fn help_text(&self) -> Option<String> {
        MietteDiagnostic::help(&self.kind).map(|h| h.to_string())
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.to_string()).with_location(self.location.clone());

        match &self.kind {
            ErrorKind::LabelSyntax(err) => {
                diag = diag.with_context(format!("while resolving {}", err.input));
            }
            ErrorKind::UnsupportedKind { label, output_type } => {
                diag = diag.with_context(format!("{} is a {}", label, output_type));
            }
            ErrorKind::Expansion(err) => {
                diag = diag.with_context(format!("for source {}", err.source_file));
            }
            _ => {}
        }

        if let Some(help) = self.help_text() {
            diag = diag.with_suggestion(help);
        }
        diag
    }
}
