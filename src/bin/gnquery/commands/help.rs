//! `gnquery help` command

use anyhow::{bail, Result};

use crate::cli::HelpArgs;
use gnquery::functions::{find_function, FUNCTIONS};
use gnquery::substitution::SOURCE_EXPANSION_HELP;

const SOURCE_EXPANSION: &str = "source_expansion";

pub fn execute(args: HelpArgs) -> Result<()> {
    let Some(topic) = args.topic else {
        println!("Built-in functions:\n");
        for function in FUNCTIONS {
            println!("  {}", function.help_short);
        }
        println!("\nOther help topics:\n");
        println!("  {}: Source expansion placeholders.", SOURCE_EXPANSION);
        return Ok(());
    };

    if topic == SOURCE_EXPANSION {
        print!("{}", SOURCE_EXPANSION_HELP);
        return Ok(());
    }

    match find_function(&topic) {
        Some(function) => {
            print!("{}", function.help);
            Ok(())
        }
        None => bail!(
            "no help topic `{}`\nhelp: run `gnquery help` to list topics",
            topic
        ),
    }
}
