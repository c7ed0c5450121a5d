use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use clap::ArgMatches;

use repkit_hor::{run_batch, RecomputeOptions, Scheme};

pub fn run_recompute(matches: &ArgMatches) -> Result<()> {
    let directory = matches
        .get_one::<String>("directory")
        .expect("A path to a results directory is required.");

    let script = matches
        .get_one::<String>("script")
        .expect("A path to the recompute script is required.");

    let mut options = RecomputeOptions::new(PathBuf::from(script));

    if let Some(interpreter) = matches.get_one::<String>("interpreter") {
        options.interpreter = interpreter.clone();
    }

    if let Some(decimals) = matches.get_one::<String>("decimals") {
        options.decimals = match decimals.parse() {
            Ok(decimals) => decimals,
            Err(_err) => anyhow::bail!("Invalid decimals value supplied: {}", decimals),
        };
    }

    if let Some(scheme) = matches.get_one::<String>("scheme") {
        options.scheme = match Scheme::from_str(scheme) {
            Ok(scheme) => scheme,
            Err(_err) => anyhow::bail!("Unknown scheme supplied: {}", scheme),
        };
    }

    let summary = run_batch(Path::new(directory), &options)?;
    println!(
        "Recomputed {} file pair(s), {} failed.",
        summary.ran, summary.failed
    );

    Ok(())
}
