use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use repkit_io::rename_beds_in_dir;

pub fn run_rename(matches: &ArgMatches) -> Result<()> {
    let directory = matches
        .get_one::<String>("directory")
        .expect("A path to a directory of bed files is required.");

    let written = rename_beds_in_dir(Path::new(directory))?;
    println!("Rewrote {} bed file(s).", written.len());

    Ok(())
}
