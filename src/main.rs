mod cli;
mod error_handling;
mod grammar;
#[cfg(test)]
mod language;
mod normalize;
mod parser;
mod trace;

use std::process;

use clap::Parser;
use itertools::Itertools;

use cli::{Cli, Mode};
use normalize::GnfStatus;
use trace::Trace;

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    // usage errors (missing arguments, unknown mode) never get here: clap
    // reports them and exits with its own usage code
    if let Err(message) = run(&cli) {
        eprintln!("{}", message);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut grammar = parser::parse_file(&cli.file)
        .map_err(|errors| errors.iter().map(|error| error.to_string()).join("\n"))?;

    let log_failure = |error: std::io::Error| {
        format!("Could not write log to {}: {}", cli.log.display(), error)
    };
    let mut trace = Trace::create(&cli.log).map_err(log_failure)?;

    let status = match cli.mode {
        Mode::Cnf => {
            normalize::to_cnf(&mut grammar, &mut trace).map_err(log_failure)?;
            None
        }
        Mode::Gnf => Some(normalize::to_gnf(&mut grammar, &mut trace).map_err(log_failure)?),
    };
    trace.finish().map_err(log_failure)?;

    if status == Some(GnfStatus::Partial) {
        eprintln!("GNF not fully achieved; see the log for the unresolved cases.");
    }
    println!("Normalization finished. Log written to {}", cli.log.display());
    Ok(())
}
