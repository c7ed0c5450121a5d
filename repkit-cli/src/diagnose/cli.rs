use clap::{Command, arg};

pub const DIAGNOSE_CMD: &str = "diagnose";

pub fn create_diagnose_cli() -> Command {
    Command::new(DIAGNOSE_CMD)
        .about("Self-overlap an annotation bed file and report how the pair table names its columns")
        .arg_required_else_help(true)
        .arg(arg!(--bed <bed> "The annotation bed file to self-overlap"))
}
