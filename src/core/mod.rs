//! Core types: paths, labels, values, items and the registry that holds
//! them during evaluation of one file.

pub mod item;
pub mod label;
pub mod registry;
pub mod scope;
pub mod settings;
pub mod source_path;
pub mod target;
pub mod value;

pub use item::Item;
pub use label::{Label, LabelError};
pub use registry::ItemRegistry;
pub use scope::EvalContext;
pub use settings::{BuildSettings, Settings};
pub use source_path::{SourceDir, SourceFile};
pub use target::{OutputType, Target};
pub use value::{Location, Value};
