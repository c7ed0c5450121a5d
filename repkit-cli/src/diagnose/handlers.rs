use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use repkit_core::models::RegionSet;
use repkit_overlaprs::diagnostics::{self_overlap, PAIR_SUFFIX};

pub fn run_diagnose(matches: &ArgMatches) -> Result<()> {
    let bed = matches
        .get_one::<String>("bed")
        .expect("A path to an annotation bed file is required.");

    println!("--- Diagnosing self-overlap of '{}' ---", bed);

    let region_set = RegionSet::try_from(Path::new(bed))?;
    let report = self_overlap(&region_set);

    println!(
        "Loaded {} annotations on {} chromosome(s).",
        report.region_count, report.chrom_count
    );

    println!("\n--- Pair table columns ---");
    println!("{:?}", report.columns);

    println!("\n--- First 5 pair rows ---");
    if report.rows.is_empty() {
        println!("Pair table is empty. No overlaps, or the file held no data rows.");
    } else {
        println!("{}", report.columns.join("\t"));
        for row in report.head(5) {
            println!("{}", row.join("\t"));
        }
    }

    let suffixed = report.suffixed_columns();
    if suffixed.is_empty() {
        println!(
            "\n--- No columns carry the '{}' suffix. ---",
            PAIR_SUFFIX
        );
    } else {
        println!("\n--- Columns carrying the '{}' suffix ---", PAIR_SUFFIX);
        println!("{:?}", suffixed);
    }

    println!("\n--- Diagnosis complete ---");

    Ok(())
}
