//! Configuration file support for gnquery.
//!
//! gnquery supports two configuration file locations:
//! - Global: `~/.gnquery/config.toml` - User-wide defaults
//! - Project: `<root>/.gnquery/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config; command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::label::Label;
use crate::core::settings::{BuildSettings, Settings};
use crate::core::source_path::SourceDir;

/// Build directory used when none is configured.
pub const DEFAULT_BUILD_DIR: &str = "//out/Debug/";

/// Toolchain used when none is configured.
pub const DEFAULT_TOOLCHAIN: &str = "//build/toolchain:default";

/// gnquery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Repository root; relative paths are taken from the working directory
    pub root: Option<PathBuf>,

    /// Build directory as a source path (e.g. `//out/Debug/`)
    pub build_dir: Option<String>,

    /// Label of the default toolchain
    pub default_toolchain: Option<String>,

    /// Toolchain files are evaluated in (defaults to the default toolchain)
    pub toolchain: Option<String>,

    /// Number of files evaluated in parallel (None = auto-detect)
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.root.is_some() {
            self.build.root = other.build.root;
        }
        if other.build.build_dir.is_some() {
            self.build.build_dir = other.build.build_dir;
        }
        if other.build.default_toolchain.is_some() {
            self.build.default_toolchain = other.build.default_toolchain;
        }
        if other.build.toolchain.is_some() {
            self.build.toolchain = other.build.toolchain;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
    }

    /// Build the toolchain settings files are evaluated with.
    pub fn settings(&self, cwd: &Path) -> Result<Settings> {
        let root = match &self.build.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => cwd.join(root),
            None => cwd.to_path_buf(),
        };

        let build_dir = self.build.build_dir.as_deref().unwrap_or(DEFAULT_BUILD_DIR);
        let build_dir = SourceDir::new(build_dir)
            .with_context(|| format!("invalid build directory `{}`", build_dir))?;

        let source_root = SourceDir::root();
        let default_toolchain = self
            .build
            .default_toolchain
            .as_deref()
            .unwrap_or(DEFAULT_TOOLCHAIN);
        let default_toolchain = Label::resolve_toolchain(&source_root, &root, default_toolchain)
            .context("invalid default toolchain")?;
        let toolchain = match &self.build.toolchain {
            Some(tc) => Label::resolve_toolchain(&source_root, &root, tc).context("invalid toolchain")?,
            None => default_toolchain.clone(),
        };

        let is_default = toolchain == default_toolchain;
        tracing::debug!(
            "root {}, build dir {}, toolchain {}{}",
            root.display(),
            build_dir,
            toolchain,
            if is_default { " (default)" } else { "" }
        );

        let build_settings = Arc::new(BuildSettings::new(root, build_dir));
        Ok(Settings::new(build_settings, toolchain, is_default))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.gnquery/config.toml)
/// 2. Global config (~/.gnquery/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global gnquery config directory (~/.gnquery).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".gnquery"))
}

/// Get the project config path (.gnquery/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".gnquery").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[build]
build_dir = "//out/Release"
default_toolchain = "//tc:clang"
jobs = 8
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.build.build_dir, Some("//out/Release".to_string()));
        assert_eq!(config.build.jobs, Some(8));
        assert!(config.build.root.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.build_dir = Some("//out/a".to_string());
        base.build.jobs = Some(4);

        let mut override_cfg = Config::default();
        override_cfg.build.build_dir = Some("//out/b".to_string());

        base.merge(override_cfg);

        assert_eq!(base.build.build_dir, Some("//out/b".to_string()));
        assert_eq!(base.build.jobs, Some(4));
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&global, "[build]\nbuild_dir = \"//out/g\"\njobs = 3\n").unwrap();
        std::fs::write(&project, "[build]\nbuild_dir = \"//out/p\"\n").unwrap();

        let config = load_config(&global, &project);
        assert_eq!(config.build.build_dir, Some("//out/p".to_string()));
        assert_eq!(config.build.jobs, Some(3));
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[build\n").unwrap();
        assert!(Config::load_or_default(&path).build.build_dir.is_none());
    }

    #[test]
    fn test_settings_from_defaults() {
        let settings = Config::default().settings(Path::new("/src/proj")).unwrap();
        assert_eq!(settings.build_settings().build_dir().as_str(), DEFAULT_BUILD_DIR);
        assert_eq!(settings.build_settings().root_path(), Path::new("/src/proj"));
        assert_eq!(
            settings.toolchain_label().user_visible_name(false),
            "//build/toolchain:default"
        );
        assert!(settings.is_default());
    }

    #[test]
    fn test_secondary_toolchain_settings() {
        let mut config = Config::default();
        config.build.toolchain = Some("//build/toolchain:arm".to_string());
        config.build.root = Some(PathBuf::from("repo"));

        let settings = config.settings(Path::new("/work")).unwrap();
        assert!(!settings.is_default());
        assert_eq!(settings.toolchain_output_subdir(), "arm/");
        assert_eq!(settings.build_settings().root_path(), Path::new("/work/repo"));
    }

    #[test]
    fn test_bad_build_dir() {
        let mut config = Config::default();
        config.build.build_dir = Some("out".to_string());
        assert!(config.settings(Path::new("/src")).is_err());
    }

    #[test]
    fn test_toolchain_cannot_leave_build_dir() {
        let mut config = Config::default();
        config.build.toolchain = Some("//build/toolchain:..".to_string());
        let err = config.settings(Path::new("/src")).unwrap_err();
        assert!(format!("{:#}", err).contains("not a valid name"));
    }
}
