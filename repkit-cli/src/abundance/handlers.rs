use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use super::cli::DEFAULT_OUT;

pub fn run_abundance(matches: &ArgMatches) -> Result<()> {
    let te = matches
        .get_one::<String>("te")
        .expect("A path to a TE annotation bed file is required.");

    let satellite = matches
        .get_one::<String>("satellite")
        .expect("A path to a satellite annotation bed file is required.");

    let overlaps = matches
        .get_one::<String>("overlaps")
        .expect("A path to an overlap table is required.");

    let default_out = DEFAULT_OUT.to_string();
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);

    repkit_abundance::run_abundance(
        Path::new(te),
        Path::new(satellite),
        Path::new(overlaps),
        Path::new(output),
    )?;

    Ok(())
}
