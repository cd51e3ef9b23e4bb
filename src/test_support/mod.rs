//! Test utilities for gnquery unit tests.
//!
//! Provides ready-made settings, label and path helpers, and a builder for
//! description files.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{default_settings, label, BuildFileFixture};
//!
//! let text = BuildFileFixture::new()
//!     .declare("action", "gen", &[], &["//out/Debug/a.h"])
//!     .call("get_target_outputs", &[":gen"])
//!     .to_toml();
//! ```

pub mod fixtures;

use std::path::Path;
use std::sync::Arc;

use crate::core::label::Label;
use crate::core::settings::{BuildSettings, Settings};
use crate::core::source_path::{SourceDir, SourceFile};
use crate::core::value::{Location, Value};

pub use fixtures::*;

/// Repository root used by the default fixtures.
pub const TEST_ROOT: &str = "/src/proj";

/// Label of the default toolchain in fixtures.
pub const TEST_TOOLCHAIN: &str = "//toolchain:default";

fn build_settings(root: &Path) -> Arc<BuildSettings> {
    Arc::new(BuildSettings::new(
        root,
        SourceDir::new("//out/Debug/").unwrap(),
    ))
}

fn toolchain(name: &str) -> Label {
    Label::new(SourceDir::new("//toolchain/").unwrap(), name)
}

/// Settings for the default toolchain, building into `//out/Debug/`.
pub fn default_settings() -> Settings {
    Settings::new(build_settings(Path::new(TEST_ROOT)), toolchain("default"), true)
}

/// Settings for a non-default toolchain named `name`.
pub fn secondary_settings(name: &str) -> Settings {
    Settings::new(build_settings(Path::new(TEST_ROOT)), toolchain(name), false)
}

/// Default-toolchain settings for a repository rooted at `root`.
pub fn settings_with_root(root: &Path) -> Settings {
    Settings::new(build_settings(root), toolchain("default"), true)
}

/// Resolve a label in the default toolchain, e.g. `label("//foo:bar")`.
pub fn label(s: &str) -> Label {
    Label::resolve(
        &SourceDir::root(),
        Path::new(TEST_ROOT),
        &toolchain("default"),
        &Value::string(s, Location::default()),
    )
    .unwrap()
}

pub fn source_files(paths: &[&str]) -> Vec<SourceFile> {
    paths.iter().map(|p| SourceFile::new(p).unwrap()).collect()
}

pub fn string_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A list value of strings.
pub fn strings(items: &[&str]) -> Value {
    Value::list(
        items
            .iter()
            .map(|s| Value::string(*s, Location::default()))
            .collect(),
        Location::default(),
    )
}

#[test]
fn test_fixture_label_uses_default_toolchain() {
    assert_eq!(label("//a:b").to_string(), format!("//a:b({})", TEST_TOOLCHAIN));
}
