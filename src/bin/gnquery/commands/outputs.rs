//! `gnquery outputs` command

use anyhow::{bail, Result};

use crate::cli::OutputsArgs;
use crate::commands::{print_value, GlobalOptions};
use gnquery::ops::evaluate_file;
use gnquery::util::diagnostic::emit;

pub fn execute(args: OutputsArgs, opts: &GlobalOptions) -> Result<()> {
    let ctx = opts.context()?;
    let settings = opts.settings(&ctx)?;

    let outcome = evaluate_file(&args.file, &settings)?;
    if let Some(ref err) = outcome.error {
        emit(&err.to_diagnostic(), ctx.color());
        bail!("failed to evaluate {}", args.file.display());
    }

    match outcome.target_outputs(&settings, &args.label) {
        Ok(value) => print_value(&value, args.json),
        Err(err) => {
            emit(&err.to_diagnostic(), ctx.color());
            bail!("could not get the outputs of `{}`", args.label)
        }
    }
}
