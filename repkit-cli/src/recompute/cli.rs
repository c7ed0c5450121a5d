use clap::{Arg, Command, arg};

pub const RECOMPUTE_CMD: &str = "recompute";

pub fn create_recompute_cli() -> Command {
    Command::new(RECOMPUTE_CMD)
        .about("Re-run the HOR score recompute script over every pairs/score file couple in a directory")
        .arg_required_else_help(true)
        .arg(Arg::new("directory"))
        .arg(arg!(--script <script> "The recompute script to invoke per pair"))
        .arg(arg!(--interpreter <interpreter> "Interpreter for the script (default: python)"))
        .arg(arg!(--decimals <decimals> "Decimal places for recomputed scores (default: 4)"))
        .arg(arg!(--scheme <scheme> "Scoring scheme: paper, partners_only, forms_only or hybrid"))
}
