//! Batch driver for recomputing HOR (higher-order repeat) score tables.
//!
//! A HOR analysis run leaves behind paired files per assembly:
//! `<prefix>.hor_pairs.tsv` and `<prefix>.hor_score.tsv`. This crate scans a
//! results directory for such pairs and re-runs the external recompute script
//! once per pair, writing `<prefix>.hor_score_continuous.tsv`. Pairs whose
//! score companion is missing are skipped with a warning; a failing
//! invocation is reported and the batch moves on.

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;

pub const PAIRS_SUFFIX: &str = ".hor_pairs.tsv";
pub const SCORE_SUFFIX: &str = ".hor_score.tsv";
pub const OUT_SUFFIX: &str = ".hor_score_continuous.tsv";

pub const DEFAULT_DECIMALS: u8 = 4;
pub const DEFAULT_INTERPRETER: &str = "python";

/// Scoring scheme passed through to the recompute script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Paper,
    PartnersOnly,
    FormsOnly,
    Hybrid,
}

#[derive(Error, Debug)]
#[error(
    "Unknown scheme: {0}. Valid options are 'paper', 'partners_only', 'forms_only' or 'hybrid'"
)]
pub struct ParseSchemeError(String);

impl FromStr for Scheme {
    type Err = ParseSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paper" => Ok(Scheme::Paper),
            "partners_only" => Ok(Scheme::PartnersOnly),
            "forms_only" => Ok(Scheme::FormsOnly),
            "hybrid" => Ok(Scheme::Hybrid),
            _ => Err(ParseSchemeError(s.to_string())),
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scheme::Paper => "paper",
            Scheme::PartnersOnly => "partners_only",
            Scheme::FormsOnly => "forms_only",
            Scheme::Hybrid => "hybrid",
        };
        write!(f, "{}", s)
    }
}

/// One recompute work item: the pairs file, its score companion, and the
/// output path derived from their shared prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecomputePair {
    pub pairs: PathBuf,
    pub score: PathBuf,
    pub out: PathBuf,
}

/// How to invoke the external recompute script.
#[derive(Debug, Clone)]
pub struct RecomputeOptions {
    pub interpreter: String,
    pub script: PathBuf,
    pub decimals: u8,
    pub scheme: Scheme,
}

impl RecomputeOptions {
    pub fn new(script: PathBuf) -> Self {
        RecomputeOptions {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            script,
            decimals: DEFAULT_DECIMALS,
            scheme: Scheme::default(),
        }
    }
}

/// Tally of one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub ran: usize,
    pub failed: usize,
}

impl RecomputePair {
    /// The argv for the external script, after the interpreter itself.
    pub fn script_args(&self, options: &RecomputeOptions) -> Vec<String> {
        vec![
            options.script.to_string_lossy().into_owned(),
            "--hor_pairs".to_string(),
            self.pairs.to_string_lossy().into_owned(),
            "--hor_score".to_string(),
            self.score.to_string_lossy().into_owned(),
            "--out".to_string(),
            self.out.to_string_lossy().into_owned(),
            "--decimals".to_string(),
            options.decimals.to_string(),
            "--scheme".to_string(),
            options.scheme.to_string(),
        ]
    }
}

///
/// Scan a directory for `*.hor_pairs.tsv` files and pair each with its
/// `*.hor_score.tsv` companion.
///
/// Pairs come back sorted by path, so a batch always runs in the same order.
/// A pairs file without a companion is skipped with a warning on stderr.
///
pub fn find_recompute_pairs(directory: &Path) -> Result<Vec<RecomputePair>> {
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {}", directory.display()))?;

    let mut pairs_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(PAIRS_SUFFIX))
        })
        .collect();
    pairs_files.sort();

    let mut pairs = Vec::with_capacity(pairs_files.len());
    for pairs_file in pairs_files {
        let Some(prefix) = pairs_file
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(PAIRS_SUFFIX))
        else {
            continue;
        };

        let score = pairs_file.with_file_name(format!("{}{}", prefix, SCORE_SUFFIX));
        if !score.exists() {
            eprintln!(
                "[skip] no matching hor_score file: {}",
                score.display()
            );
            continue;
        }

        let out = pairs_file.with_file_name(format!("{}{}", prefix, OUT_SUFFIX));
        pairs.push(RecomputePair {
            pairs: pairs_file,
            score,
            out,
        });
    }

    Ok(pairs)
}

///
/// Run the recompute script over every pair found in `directory`.
///
/// Each invocation is echoed before it runs. A spawn failure or non-zero
/// exit is reported on stderr and counted; the batch keeps going.
///
pub fn run_batch(directory: &Path, options: &RecomputeOptions) -> Result<BatchSummary> {
    let pairs = find_recompute_pairs(directory)?;

    let mut summary = BatchSummary::default();
    for pair in &pairs {
        let args = pair.script_args(options);
        println!("[run] {} {}", options.interpreter, args.join(" "));

        match Command::new(&options.interpreter).args(&args).status() {
            Ok(status) if status.success() => summary.ran += 1,
            Ok(status) => {
                eprintln!(
                    "[fail] {} exited with {} for {}",
                    options.interpreter,
                    status,
                    pair.pairs.display()
                );
                summary.failed += 1;
            }
            Err(err) => {
                eprintln!(
                    "[fail] could not run {}: {}",
                    options.interpreter, err
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn touch(path: &Path) {
        std::fs::File::create(path).unwrap();
    }

    #[rstest]
    #[case("paper", Scheme::Paper)]
    #[case("partners_only", Scheme::PartnersOnly)]
    #[case("forms_only", Scheme::FormsOnly)]
    #[case("hybrid", Scheme::Hybrid)]
    fn test_scheme_round_trip(#[case] text: &str, #[case] scheme: Scheme) {
        assert_eq!(text.parse::<Scheme>().unwrap(), scheme);
        assert_eq!(scheme.to_string(), text);
    }

    #[rstest]
    fn test_scheme_rejects_unknown() {
        assert!("fancy".parse::<Scheme>().is_err());
    }

    #[rstest]
    fn test_find_pairs_skips_missing_score() {
        let tempdir = tempfile::tempdir().unwrap();
        let dir = tempdir.path();

        touch(&dir.join("AA_Ogla_chr1.hor_pairs.tsv"));
        touch(&dir.join("AA_Ogla_chr1.hor_score.tsv"));
        touch(&dir.join("AA_Ogla_chr2.hor_pairs.tsv")); // no score companion
        touch(&dir.join("notes.txt"));

        let pairs = find_recompute_pairs(dir).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(
            pairs[0].out.file_name().unwrap().to_str().unwrap(),
            "AA_Ogla_chr1.hor_score_continuous.tsv"
        );
    }

    #[rstest]
    fn test_find_pairs_is_sorted() {
        let tempdir = tempfile::tempdir().unwrap();
        let dir = tempdir.path();

        for prefix in ["b_second", "a_first"] {
            touch(&dir.join(format!("{}{}", prefix, PAIRS_SUFFIX)));
            touch(&dir.join(format!("{}{}", prefix, SCORE_SUFFIX)));
        }

        let pairs = find_recompute_pairs(dir).unwrap();
        let names: Vec<&str> = pairs
            .iter()
            .map(|p| p.pairs.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["a_first.hor_pairs.tsv", "b_second.hor_pairs.tsv"]
        );
    }

    #[rstest]
    fn test_missing_directory_is_error() {
        assert!(find_recompute_pairs(Path::new("no/such/dir")).is_err());
    }

    #[rstest]
    fn test_script_args_layout() {
        let pair = RecomputePair {
            pairs: PathBuf::from("r/x.hor_pairs.tsv"),
            score: PathBuf::from("r/x.hor_score.tsv"),
            out: PathBuf::from("r/x.hor_score_continuous.tsv"),
        };
        let options = RecomputeOptions::new(PathBuf::from("Recompute_Hor_Score.py"));

        assert_eq!(
            pair.script_args(&options),
            vec![
                "Recompute_Hor_Score.py",
                "--hor_pairs",
                "r/x.hor_pairs.tsv",
                "--hor_score",
                "r/x.hor_score.tsv",
                "--out",
                "r/x.hor_score_continuous.tsv",
                "--decimals",
                "4",
                "--scheme",
                "paper",
            ]
        );
    }

    #[cfg(unix)]
    #[rstest]
    fn test_run_batch_counts_outcomes() {
        let tempdir = tempfile::tempdir().unwrap();
        let dir = tempdir.path();
        touch(&dir.join("x.hor_pairs.tsv"));
        touch(&dir.join("x.hor_score.tsv"));

        let mut options = RecomputeOptions::new(PathBuf::from("unused.py"));

        options.interpreter = "true".to_string();
        let summary = run_batch(dir, &options).unwrap();
        assert_eq!(summary, BatchSummary { ran: 1, failed: 0 });

        options.interpreter = "false".to_string();
        let summary = run_batch(dir, &options).unwrap();
        assert_eq!(summary, BatchSummary { ran: 0, failed: 1 });
    }
}
