//! Build and toolchain settings.
//!
//! [`BuildSettings`] is shared by every toolchain of a build; [`Settings`]
//! adds the toolchain a file is being evaluated in. Both are immutable once
//! created and are shared across evaluation workers behind an `Arc`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::label::{check_name, Label};
use crate::core::source_path::SourceDir;

/// Prefix under gen/obj directories for sources outside the source root.
const ABS_PATH_PREFIX: &str = "ABS_PATH";

/// Settings shared by the whole build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    root_path: PathBuf,
    build_dir: SourceDir,
}

impl BuildSettings {
    /// Create build settings for a repository at `root_path` building into
    /// `build_dir` (for example `//out/Debug/`).
    pub fn new(root_path: impl Into<PathBuf>, build_dir: SourceDir) -> Self {
        BuildSettings {
            root_path: root_path.into(),
            build_dir,
        }
    }

    /// Filesystem path of the repository root (`//`).
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn build_dir(&self) -> &SourceDir {
        &self.build_dir
    }
}

/// Which per-toolchain build subdirectory to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDirType {
    /// Root of the toolchain's outputs
    ToolchainRoot,
    /// Generated sources (`gen/`)
    Gen,
    /// Object files (`obj/`)
    Obj,
}

/// Settings for one toolchain of the build.
#[derive(Debug, Clone)]
pub struct Settings {
    build_settings: Arc<BuildSettings>,
    toolchain_label: Label,
    is_default: bool,
    toolchain_output_subdir: String,
}

impl Settings {
    /// Create settings for `toolchain_label`.
    ///
    /// The default toolchain writes directly into the build directory;
    /// every other toolchain gets a subdirectory named after it.
    pub fn new(build_settings: Arc<BuildSettings>, toolchain_label: Label, is_default: bool) -> Self {
        let toolchain_label = toolchain_label.without_toolchain();
        debug_assert!(
            check_name(toolchain_label.name()).is_ok(),
            "toolchain name {} cannot name an output subdirectory",
            toolchain_label.name()
        );
        let toolchain_output_subdir = if is_default {
            String::new()
        } else {
            format!("{}/", toolchain_label.name())
        };
        Settings {
            build_settings,
            toolchain_label,
            is_default,
            toolchain_output_subdir,
        }
    }

    pub fn build_settings(&self) -> &BuildSettings {
        &self.build_settings
    }

    pub fn toolchain_label(&self) -> &Label {
        &self.toolchain_label
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn toolchain_output_subdir(&self) -> &str {
        &self.toolchain_output_subdir
    }

    /// The toolchain's build directory of the given type.
    pub fn build_dir(&self, kind: BuildDirType) -> SourceDir {
        let mut dir = format!(
            "{}{}",
            self.build_settings.build_dir().as_str(),
            self.toolchain_output_subdir
        );
        match kind {
            BuildDirType::ToolchainRoot => {}
            BuildDirType::Gen => dir.push_str("gen/"),
            BuildDirType::Obj => dir.push_str("obj/"),
        }
        SourceDir::new(&dir).unwrap_or_else(|_| self.build_settings.build_dir().clone())
    }

    /// The build directory of the given type mirroring `source_dir`.
    ///
    /// `//foo/bar/` maps to `<build>/gen/foo/bar/`; directories outside
    /// the source root map below an `ABS_PATH` component.
    pub fn sub_build_dir(&self, source_dir: &SourceDir, kind: BuildDirType) -> SourceDir {
        let base = self.build_dir(kind);
        let tail = match source_dir.as_str().strip_prefix("//") {
            Some(rest) => rest.to_string(),
            None => format!("{}{}", ABS_PATH_PREFIX, source_dir.as_str()),
        };
        SourceDir::new(&format!("{}{}", base.as_str(), tail)).unwrap_or(base)
    }
}
