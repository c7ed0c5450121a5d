use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{BedIoError, Result};

/// Suffix inserted before `.bed` in rewritten file names,
/// e.g. `AA_Ogla_hap1.bed` becomes `AA_Ogla_hap1_updated.bed`.
pub const UPDATED_SUFFIX: &str = "_updated";

///
/// Rewrite the `name` column (column 4) of a bed file.
///
/// Every data row with at least 4 tab-separated columns gets its 4th column
/// replaced by `new_name`; all other columns and the row order are kept.
/// Rows with fewer than 4 columns are written out unchanged, so files with
/// stray malformed lines still round-trip.
///
/// # Arguments
/// - input: the bed file to read
/// - output: where to write the rewritten file
/// - new_name: the value to put in column 4
///
/// # Returns
/// The number of rows whose name column was rewritten.
///
pub fn rewrite_name_column(input: &Path, output: &Path, new_name: &str) -> Result<usize> {
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);

    let mut rewritten = 0;
    for line in reader.lines() {
        let line = line?;
        let mut parts: Vec<&str> = line.split('\t').collect();

        if parts.len() >= 4 {
            parts[3] = new_name;
            rewritten += 1;
            writeln!(writer, "{}", parts.join("\t"))?;
        } else {
            writeln!(writer, "{}", line)?;
        }
    }
    writer.flush()?;

    Ok(rewritten)
}

///
/// Rewrite the name column of one bed file to its own file stem.
///
/// The output lands next to the input as `<stem>_updated.bed`.
///
/// # Returns
/// The path of the written file.
///
pub fn rename_bed_to_stem(input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| BedIoError::NoFileStem(input.display().to_string()))?
        .to_string();

    let output = input.with_file_name(format!("{}{}.bed", stem, UPDATED_SUFFIX));
    rewrite_name_column(input, &output, &stem)?;

    Ok(output)
}

///
/// Rewrite the name column of every `*.bed` file in a directory.
///
/// Files are processed in sorted order; the file list is taken before any
/// output is written, so the `_updated` outputs of this run are not picked
/// up as inputs. A file that fails to process is reported on stderr and
/// skipped; the rest of the batch still runs.
///
/// # Returns
/// The paths of all files written.
///
pub fn rename_beds_in_dir(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(BedIoError::NotADirectory(directory.display().to_string()));
    }

    let mut inputs: Vec<PathBuf> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "bed"))
        .collect();
    inputs.sort();

    let mut written = Vec::with_capacity(inputs.len());
    for input in &inputs {
        println!("Processing file: {}", input.display());
        match rename_bed_to_stem(input) {
            Ok(output) => written.push(output),
            Err(err) => eprintln!("[skip] {}: {}", input.display(), err),
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn write_bed(path: &Path, lines: &[&str]) {
        let mut file = File::create(path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[rstest]
    fn test_rewrite_name_column() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = tempdir.path().join("AA_Ogla_hap1.bed");
        let output = tempdir.path().join("out.bed");
        write_bed(
            &input,
            &[
                "Chr01\t0\t100\told_name\t0\t+",
                "Chr01\t200\t300\tother_name",
            ],
        );

        let rewritten = rewrite_name_column(&input, &output, "AA_Ogla_hap1").unwrap();
        assert_eq!(rewritten, 2);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            content,
            "Chr01\t0\t100\tAA_Ogla_hap1\t0\t+\nChr01\t200\t300\tAA_Ogla_hap1\n"
        );
    }

    #[rstest]
    fn test_short_rows_pass_through() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = tempdir.path().join("short.bed");
        let output = tempdir.path().join("out.bed");
        write_bed(&input, &["Chr01\t0\t100", "Chr01\t200\t300\tnamed"]);

        let rewritten = rewrite_name_column(&input, &output, "short").unwrap();
        assert_eq!(rewritten, 1);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "Chr01\t0\t100\nChr01\t200\t300\tshort\n");
    }

    #[rstest]
    fn test_rename_bed_to_stem() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = tempdir.path().join("AA_Osat_hap2.bed");
        write_bed(&input, &["Chr03\t10\t50\twhatever\t0\t-"]);

        let output = rename_bed_to_stem(&input).unwrap();
        assert_eq!(
            output.file_name().unwrap().to_str().unwrap(),
            "AA_Osat_hap2_updated.bed"
        );

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "Chr03\t10\t50\tAA_Osat_hap2\t0\t-\n");
    }

    #[rstest]
    fn test_rename_dir_processes_only_bed_files() {
        let tempdir = tempfile::tempdir().unwrap();
        write_bed(
            &tempdir.path().join("b_second.bed"),
            &["Chr01\t0\t10\tx"],
        );
        write_bed(
            &tempdir.path().join("a_first.bed"),
            &["Chr01\t0\t10\tx"],
        );
        write_bed(
            &tempdir.path().join("notes.txt"),
            &["Chr01\t0\t10\tx"],
        );

        let written = rename_beds_in_dir(tempdir.path()).unwrap();
        let names: Vec<&str> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a_first_updated.bed", "b_second_updated.bed"]);
    }

    #[rstest]
    fn test_rename_dir_continues_past_broken_entry() {
        let tempdir = tempfile::tempdir().unwrap();
        // a directory with a .bed extension passes the filter but can't be
        // opened as a file
        std::fs::create_dir(tempdir.path().join("a_broken.bed")).unwrap();
        write_bed(
            &tempdir.path().join("b_good.bed"),
            &["Chr01\t0\t10\tx"],
        );

        let written = rename_beds_in_dir(tempdir.path()).unwrap();
        let names: Vec<&str> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["b_good_updated.bed"]);
        assert!(tempdir.path().join("b_good_updated.bed").exists());
    }

    #[rstest]
    fn test_rename_dir_rejects_files() {
        let tempdir = tempfile::tempdir().unwrap();
        let file = tempdir.path().join("file.bed");
        write_bed(&file, &["Chr01\t0\t10\tx"]);

        let err = rename_beds_in_dir(&file).unwrap_err();
        assert!(matches!(err, BedIoError::NotADirectory(_)));
    }
}
