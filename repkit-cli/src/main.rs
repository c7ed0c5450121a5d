mod abundance;
mod diagnose;
mod recompute;
mod rename;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "repkit";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Tools for working with repeat annotations: TE/satellite overlap abundance, bed name rewriting, HOR score recomputation, and overlap-join diagnostics.")
        .subcommand_required(true)
        .subcommand(abundance::cli::create_abundance_cli())
        .subcommand(rename::cli::create_rename_cli())
        .subcommand(recompute::cli::create_recompute_cli())
        .subcommand(diagnose::cli::create_diagnose_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // ABUNDANCE
        //
        Some((abundance::cli::ABUNDANCE_CMD, matches)) => {
            abundance::handlers::run_abundance(matches)?;
        }

        //
        // RENAME
        //
        Some((rename::cli::RENAME_CMD, matches)) => {
            rename::handlers::run_rename(matches)?;
        }

        //
        // RECOMPUTE
        //
        Some((recompute::cli::RECOMPUTE_CMD, matches)) => {
            recompute::handlers::run_recompute(matches)?;
        }

        //
        // DIAGNOSE
        //
        Some((diagnose::cli::DIAGNOSE_CMD, matches)) => {
            diagnose::handlers::run_diagnose(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
