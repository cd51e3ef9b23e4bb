//! Command implementations

pub mod eval;
pub mod expand;
pub mod help;
pub mod label;
pub mod outputs;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::Cli;
use gnquery::core::Settings;
use gnquery::util::config::Config;
use gnquery::util::GlobalContext;
use gnquery::Value;

/// Flags shared by every command.
pub struct GlobalOptions {
    pub color: bool,
    pub root: Option<PathBuf>,
    pub build_dir: Option<String>,
    pub toolchain: Option<String>,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        GlobalOptions {
            color: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            root: cli.root.clone(),
            build_dir: cli.build_dir.clone(),
            toolchain: cli.toolchain.clone(),
        }
    }

    /// Context with output options applied.
    pub fn context(&self) -> Result<GlobalContext> {
        let mut ctx = GlobalContext::new()?;
        ctx.set_color(self.color);
        Ok(ctx)
    }

    /// Command-line flags as a config layer.
    pub fn overrides(&self) -> Config {
        let mut config = Config::default();
        config.build.root = self.root.clone();
        config.build.build_dir = self.build_dir.clone();
        config.build.toolchain = self.toolchain.clone();
        config
    }

    /// Settings from config files plus flags.
    pub fn settings(&self, ctx: &GlobalContext) -> Result<Settings> {
        ctx.settings(self.overrides())
    }
}

/// Print a function result: one line per list element, or JSON.
pub fn print_value(value: &Value, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }
    match value.as_list() {
        Some(items) => {
            for item in items {
                print_scalar(item);
            }
        }
        None => print_scalar(value),
    }
    Ok(())
}

fn print_scalar(value: &Value) {
    match value.as_str() {
        Some(s) => println!("{}", s),
        None => println!("{}", value),
    }
}
