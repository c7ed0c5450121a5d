use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Derive the repeat category from an annotation name.
///
/// Repeat annotations encode the family in the name column as
/// `CATEGORY:detail:detail`, e.g. `LTR/Copia:Chr01:5021`. The category is
/// everything before the first `:`; a name with no colon is its own
/// category.
pub fn te_category(name: &str) -> &str {
    match name.find(':') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::{BufRead, Write};

    #[rstest]
    #[case("LTR/Gypsy:Chr01:100", "LTR/Gypsy")]
    #[case("DNA/Helitron", "DNA/Helitron")]
    #[case("Cent7:a:b:c", "Cent7")]
    #[case("", "")]
    fn test_te_category(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(te_category(name), expected);
    }

    #[rstest]
    fn test_dynamic_reader_plain() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("plain.bed");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Chr01\t0\t10\tname").unwrap();

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["Chr01\t0\t10\tname".to_string()]);
    }

    #[rstest]
    fn test_dynamic_reader_missing_file() {
        let result = get_dynamic_reader(Path::new("definitely/not/here.bed"));
        assert!(result.is_err());
    }
}
