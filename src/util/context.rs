//! Global context for gnquery operations.
//!
//! Provides centralized access to the working directory, color output and
//! the merged configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::settings::Settings;
use crate::util::config::{global_config_dir, load_config, project_config_path, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global gnquery data (~/.gnquery/)
    home: PathBuf,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = global_config_dir().unwrap_or_else(|| PathBuf::from(".gnquery"));

        Ok(GlobalContext {
            cwd,
            home,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path, below `root` or the cwd.
    pub fn project_config_path(&self, root: Option<&Path>) -> PathBuf {
        project_config_path(root.unwrap_or(&self.cwd))
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Load the merged global and project configuration.
    pub fn config(&self, root: Option<&Path>) -> Config {
        let root = root.map(|r| self.cwd.join(r));
        load_config(&self.config_path(), &self.project_config_path(root.as_deref()))
    }

    /// Settings for evaluating files, from config plus `overrides`.
    pub fn settings(&self, overrides: Config) -> Result<Settings> {
        let mut config = self.config(overrides.build.root.as_deref());
        config.merge(overrides);
        config.settings(&self.cwd)
    }
}
