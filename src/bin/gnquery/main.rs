//! gnquery CLI - evaluation-time queries over build descriptions

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::GlobalOptions;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("gnquery=debug")
    } else {
        EnvFilter::new("gnquery=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let opts = GlobalOptions::from_cli(&cli);

    // Execute command
    match cli.command {
        Commands::Eval(args) => commands::eval::execute(args, &opts),
        Commands::Outputs(args) => commands::outputs::execute(args, &opts),
        Commands::Expand(args) => commands::expand::execute(args, &opts),
        Commands::Label(args) => commands::label::execute(args, &opts),
        Commands::Help(args) => commands::help::execute(args),
    }
}
