//! gnquery - evaluation-time target queries for build descriptions
//!
//! This crate answers structural questions about targets while a build
//! description file is still being evaluated, most importantly "what files
//! will this target produce?" (`get_target_outputs`). It resolves label
//! expressions, searches the items declared so far in the same file, and
//! computes output paths either verbatim or by source expansion.

pub mod core;
pub mod functions;
pub mod ops;
pub mod substitution;
pub mod util;

/// Test fixtures shared by unit tests.
///
/// This module is only available when compiling tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    item::Item, label::Label, registry::ItemRegistry, scope::EvalContext, settings::Settings,
    source_path::SourceFile, target::Target, value::Value,
};

pub use functions::{run_function, ErrorKind, EvalError};
pub use util::context::GlobalContext;
