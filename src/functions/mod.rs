//! Built-in functions callable from a build description.
//!
//! Each function is a plain `fn` over an [`EvalContext`]; the table below
//! carries its documentation so the CLI can show it.

pub mod errors;
pub mod get_target_outputs;
pub mod process_file_template;

pub use errors::{ErrorKind, EvalError};

use crate::core::scope::EvalContext;
use crate::core::value::{Location, Value};

/// Signature shared by all built-in functions.
pub type FunctionRunner = fn(&EvalContext<'_>, &Location, &[Value]) -> Result<Value, EvalError>;

/// A built-in function and its documentation.
#[derive(Debug, Clone, Copy)]
pub struct FunctionInfo {
    pub name: &'static str,
    pub help_short: &'static str,
    pub help: &'static str,
    pub runner: FunctionRunner,
}

/// All built-in functions, sorted by name.
pub static FUNCTIONS: &[FunctionInfo] = &[
    FunctionInfo {
        name: get_target_outputs::NAME,
        help_short: get_target_outputs::HELP_SHORT,
        help: get_target_outputs::HELP,
        runner: get_target_outputs::run,
    },
    FunctionInfo {
        name: process_file_template::NAME,
        help_short: process_file_template::HELP_SHORT,
        help: process_file_template::HELP,
        runner: process_file_template::run,
    },
];

/// Look up a built-in function by name.
pub fn find_function(name: &str) -> Option<&'static FunctionInfo> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// Call the built-in `name` with `args`.
pub fn run_function(
    ctx: &EvalContext<'_>,
    name: &str,
    call_site: &Location,
    args: &[Value],
) -> Result<Value, EvalError> {
    let function = find_function(name).ok_or_else(|| {
        EvalError::new(
            ErrorKind::UnknownFunction {
                name: name.to_string(),
            },
            call_site.clone(),
        )
    })?;
    tracing::debug!("calling {}() at {}", name, call_site);
    (function.runner)(ctx, call_site, args)
}
