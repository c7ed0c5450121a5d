use clap::{Arg, Command};

pub const RENAME_CMD: &str = "rename";

pub fn create_rename_cli() -> Command {
    Command::new(RENAME_CMD)
        .about("Rewrite the name column of every bed file in a directory to the file's own stem")
        .arg_required_else_help(true)
        .arg(Arg::new("directory"))
}
