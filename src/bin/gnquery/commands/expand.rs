//! `gnquery expand` command

use anyhow::{bail, Context, Result};

use crate::cli::ExpandArgs;
use crate::commands::{print_value, GlobalOptions};
use gnquery::core::{EvalContext, Location, SourceDir, Value};
use gnquery::functions::{process_file_template, run_function};
use gnquery::util::diagnostic::emit;

pub fn execute(args: ExpandArgs, opts: &GlobalOptions) -> Result<()> {
    let ctx = opts.context()?;
    let settings = opts.settings(&ctx)?;
    let dir = SourceDir::new(&args.dir).with_context(|| format!("invalid directory `{}`", args.dir))?;

    let call_site = Location::new("<command line>", 0, 0);
    let strings = |items: &[String]| {
        Value::list(
            items
                .iter()
                .map(|s| Value::string(s.as_str(), call_site.clone()))
                .collect(),
            call_site.clone(),
        )
    };
    let call_args = [strings(&args.sources), strings(&args.templates)];

    let eval_ctx = EvalContext::new(&settings, &dir);
    match run_function(&eval_ctx, process_file_template::NAME, &call_site, &call_args) {
        Ok(value) => print_value(&value, args.json),
        Err(err) => {
            emit(&err.to_diagnostic(), ctx.color());
            bail!("expansion failed")
        }
    }
}
