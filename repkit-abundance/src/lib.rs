//! TE/satellite overlap abundance analysis.
//!
//! Takes three inputs: a TE annotation bed file, a satellite annotation bed
//! file, and a precomputed overlap table (csv with `TE_Kind`,
//! `Satellite_Name`, `Overlap_Length`). Produces a TE-category-by-satellite
//! matrix of overlap spans, normalized by each category's total annotated
//! length, and renders it as an annotated heatmap.
//!
//! The interesting question the normalization answers: what fraction of a TE
//! category's DNA overlaps each satellite family?

pub mod heatmap;
pub mod load;
pub mod matrix;

// re-exports
pub use heatmap::render_heatmap;
pub use load::{read_overlap_table, OverlapRecord};
pub use matrix::{category_totals, family_totals, AbundanceMatrix};

use std::path::Path;

use anyhow::Result;
use fxhash::FxHashMap as HashMap;

use repkit_core::models::RegionSet;

/// Print the first few entries of a totals table, label-sorted.
fn print_totals(title: &str, totals: &HashMap<String, u64>) {
    println!("\n{}", title);
    let mut entries: Vec<(&String, &u64)> = totals.iter().collect();
    entries.sort_by_key(|(label, _)| label.as_str());
    for (label, total) in entries.iter().take(5) {
        println!("  {}\t{}", label, total);
    }
    if entries.len() > 5 {
        println!("  ... ({} labels total)", entries.len());
    }
}

///
/// The full abundance analysis: load, group, pivot, normalize, render.
///
/// # Arguments
/// - te_bed: TE annotation bed file (name column carries `CATEGORY:detail`)
/// - satellite_bed: satellite annotation bed file (name column is the family)
/// - overlap_table: precomputed overlap csv
/// - output: path of the heatmap svg to write
///
/// # Returns
/// The normalized [`AbundanceMatrix`] that was rendered.
///
pub fn run_abundance(
    te_bed: &Path,
    satellite_bed: &Path,
    overlap_table: &Path,
    output: &Path,
) -> Result<AbundanceMatrix> {
    println!("--- Loading annotation tables ---");
    let te_regions = RegionSet::try_from(te_bed)?;
    let satellite_regions = RegionSet::try_from(satellite_bed)?;
    let overlaps = read_overlap_table(overlap_table)?;
    println!(
        "Loaded {} TE annotations ({} bp), {} satellite annotations ({} bp), {} overlap records.",
        te_regions.len(),
        te_regions.nucleotides_length(),
        satellite_regions.len(),
        satellite_regions.nucleotides_length(),
        overlaps.len()
    );

    let te_totals = category_totals(&te_regions);
    let satellite_totals = family_totals(&satellite_regions);
    print_totals("TE category totals (bp):", &te_totals);
    print_totals("Satellite family totals (bp):", &satellite_totals);

    let mut abundance = AbundanceMatrix::from_overlaps(&overlaps);
    abundance.normalize_rows(&te_totals);

    render_heatmap(&abundance, output)?;
    println!("\nHeatmap written to {}", output.display());

    Ok(abundance)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/abundance")
            .join(file_name)
    }

    #[rstest]
    fn test_run_abundance_end_to_end() {
        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("heatmap.svg");

        let abundance = run_abundance(
            &get_test_path("te_annotations.bed"),
            &get_test_path("satellite_annotations.bed"),
            &get_test_path("te_satellite_overlaps.csv"),
            &out,
        )
        .unwrap();

        assert!(out.exists());

        // LTR/Gypsy totals 1000 bp in te_annotations.bed and overlaps
        // Cen155 by 120 + 80 = 200 bp
        assert_eq!(abundance.get("LTR/Gypsy", "Cen155"), Some(0.2));
        // DNA/Helitron never overlaps TR-45
        assert_eq!(abundance.get("DNA/Helitron", "TR-45"), Some(0.0));
    }

    #[rstest]
    fn test_run_abundance_missing_input() {
        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("heatmap.svg");

        let result = run_abundance(
            Path::new("no/such/te.bed"),
            &get_test_path("satellite_annotations.bed"),
            &get_test_path("te_satellite_overlaps.csv"),
            &out,
        );
        assert!(result.is_err());
        assert!(!out.exists());
    }
}
