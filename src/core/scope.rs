//! Evaluation context handed to built-in functions.
//!
//! The context is what a function call can see of the file being
//! evaluated: the directory that relative names are anchored to, the
//! toolchain settings, and (while a file is being evaluated) the registry
//! of items declared so far. It only ever borrows the registry.

use std::path::Path;

use crate::core::label::Label;
use crate::core::registry::ItemRegistry;
use crate::core::settings::Settings;
use crate::core::source_path::SourceDir;

/// Read-only view of one file's evaluation state at a call site.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    settings: &'a Settings,
    source_dir: &'a SourceDir,
    items: Option<&'a ItemRegistry>,
}

impl<'a> EvalContext<'a> {
    /// A context outside any file evaluation: no registry is attached.
    pub fn new(settings: &'a Settings, source_dir: &'a SourceDir) -> Self {
        EvalContext {
            settings,
            source_dir,
            items: None,
        }
    }

    /// Attach the registry of the file being evaluated.
    pub fn with_items(mut self, items: &'a ItemRegistry) -> Self {
        self.items = Some(items);
        self
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Directory of the file being evaluated.
    pub fn source_dir(&self) -> &'a SourceDir {
        self.source_dir
    }

    pub fn root_path(&self) -> &'a Path {
        self.settings.build_settings().root_path()
    }

    /// Toolchain that unqualified labels belong to.
    pub fn toolchain_label(&self) -> &'a Label {
        self.settings.toolchain_label()
    }

    /// Items declared so far, or `None` when not evaluating a file.
    pub fn items(&self) -> Option<&'a ItemRegistry> {
        self.items
    }
}
