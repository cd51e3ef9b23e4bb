//! `gnquery label` command

use anyhow::{Context, Result};

use crate::cli::LabelArgs;
use crate::commands::GlobalOptions;
use gnquery::core::{Label, Location, SourceDir, Value};

pub fn execute(args: LabelArgs, opts: &GlobalOptions) -> Result<()> {
    let ctx = opts.context()?;
    let settings = opts.settings(&ctx)?;
    let dir = SourceDir::new(&args.dir).with_context(|| format!("invalid directory `{}`", args.dir))?;

    let input = Value::string(args.label.as_str(), Location::new("<command line>", 0, 0));
    let label = Label::resolve(
        &dir,
        settings.build_settings().root_path(),
        settings.toolchain_label(),
        &input,
    )?;

    println!("{}", label.user_visible_name(!args.no_toolchain));
    Ok(())
}
