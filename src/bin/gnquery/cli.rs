//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// gnquery - Evaluate build descriptions and query target outputs
#[derive(Parser)]
#[command(name = "gnquery")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Repository root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Build directory as a source path, e.g. //out/Debug
    #[arg(long, global = true)]
    pub build_dir: Option<String>,

    /// Toolchain to evaluate in (defaults to the default toolchain)
    #[arg(long, global = true)]
    pub toolchain: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate build description files and print call results
    Eval(EvalArgs),

    /// Print the outputs of a target declared in a file
    Outputs(OutputsArgs),

    /// Expand a source template against source files
    Expand(ExpandArgs),

    /// Resolve a label expression
    Label(LabelArgs),

    /// Show help for a built-in function or topic
    Help(HelpArgs),
}

#[derive(Args)]
pub struct EvalArgs {
    /// Description files to evaluate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Emit results as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of files to evaluate in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct OutputsArgs {
    /// Description file declaring the target
    pub file: PathBuf,

    /// Label of the target, e.g. :my_action
    pub label: String,

    /// Emit results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ExpandArgs {
    /// Output template (may be repeated)
    #[arg(short, long = "template", required = true)]
    pub templates: Vec<String>,

    /// Source files, relative to --dir
    #[arg(required = true)]
    pub sources: Vec<String>,

    /// Directory relative sources are resolved against
    #[arg(long, default_value = "//")]
    pub dir: String,

    /// Emit results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LabelArgs {
    /// Label expression, e.g. ../bar:baz
    pub label: String,

    /// Directory the label is written in
    #[arg(long, default_value = "//")]
    pub dir: String,

    /// Omit the toolchain from the printed label
    #[arg(long)]
    pub no_toolchain: bool,
}

#[derive(Args)]
pub struct HelpArgs {
    /// Function name or `source_expansion`
    pub topic: Option<String>,
}
