//! `gnquery eval` command

use anyhow::{bail, Result};
use serde_json::json;

use crate::cli::EvalArgs;
use crate::commands::{print_value, GlobalOptions};
use gnquery::ops::{evaluate_files, FileOutcome};
use gnquery::util::diagnostic::emit;

pub fn execute(args: EvalArgs, opts: &GlobalOptions) -> Result<()> {
    let ctx = opts.context()?;
    let settings = opts.settings(&ctx)?;
    let jobs = args.jobs.or_else(|| ctx.config(opts.root.as_deref()).build.jobs);

    let reports = evaluate_files(&args.files, &settings, jobs)?;

    let mut failed = 0;
    let mut json_reports = Vec::new();
    for report in reports {
        let outcome = match report.outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("error: {:#}", e);
                failed += 1;
                continue;
            }
        };

        if let Some(ref err) = outcome.error {
            emit(&err.to_diagnostic(), ctx.color());
            failed += 1;
        }

        if args.json {
            json_reports.push(outcome_json(&outcome));
        } else {
            for result in &outcome.results {
                if args.files.len() > 1 {
                    println!("# {} {}", result.location, result.function);
                }
                print_value(&result.value, false)?;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json_reports)?);
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed to evaluate", failed, args.files.len());
    }
    Ok(())
}

fn outcome_json(outcome: &FileOutcome) -> serde_json::Value {
    let results: Vec<_> = outcome
        .results
        .iter()
        .map(|r| {
            json!({
                "function": r.function,
                "location": r.location.to_string(),
                "value": r.value,
            })
        })
        .collect();

    json!({
        "file": outcome.file.as_str(),
        "results": results,
        "error": outcome.error.as_ref().map(|e| e.to_string()),
    })
}
