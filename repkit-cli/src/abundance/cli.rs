use clap::{Command, arg};

pub const ABUNDANCE_CMD: &str = "abundance";
pub const DEFAULT_OUT: &str = "abundance_heatmap.svg";

pub fn create_abundance_cli() -> Command {
    Command::new(ABUNDANCE_CMD)
        .about("Build the normalized TE x satellite overlap abundance heatmap")
        .arg_required_else_help(true)
        .arg(arg!(--te <te> "The TE annotation bed file"))
        .arg(arg!(--satellite <satellite> "The satellite annotation bed file"))
        .arg(arg!(--overlaps <overlaps> "The precomputed overlap csv"))
        .arg(arg!(--output <output> "Where to write the heatmap svg"))
}
