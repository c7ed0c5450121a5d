//! Self-overlap diagnostics.
//!
//! Overlapping an annotation file against itself is the quickest way to see
//! how the pair table names its columns when both sides carry the same
//! fields. This module materializes that table for a [`RegionSet`]: left-hand
//! columns keep their plain names, right-hand columns get the [`PAIR_SUFFIX`]
//! appended, and every region keeps its source row index so duplicate
//! annotations stay distinguishable.

use fxhash::FxHashMap as HashMap;

use repkit_core::models::{Interval, RegionSet};

use crate::{AIList, Overlapper};

/// Suffix appended to right-hand columns of the pair table.
pub const PAIR_SUFFIX: &str = "_b";

/// Placeholder for rows without a name column.
const MISSING_FIELD: &str = ".";

/// The materialized self-overlap pair table.
#[derive(Debug)]
pub struct SelfOverlapReport {
    /// Column names of the pair table, in output order.
    pub columns: Vec<String>,
    /// One row per (region, overlapping region) pair, including self pairs.
    pub rows: Vec<Vec<String>>,
    /// Number of regions in the input.
    pub region_count: usize,
    /// Number of distinct chromosomes in the input.
    pub chrom_count: usize,
}

impl SelfOverlapReport {
    /// The first `n` rows of the pair table.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// Column names that carry the [`PAIR_SUFFIX`].
    pub fn suffixed_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.ends_with(PAIR_SUFFIX))
            .map(|c| c.as_str())
            .collect()
    }
}

/// Overlap a [`RegionSet`] against itself and build the pair table.
///
/// Pairs are emitted in source row order on the left side, and by right-hand
/// row index within each left-hand region, so the output is deterministic for
/// a given input file.
pub fn self_overlap(region_set: &RegionSet) -> SelfOverlapReport {
    let mut by_chr: HashMap<&str, Vec<Interval<u32, usize>>> = HashMap::default();
    for (idx, region) in region_set.regions.iter().enumerate() {
        by_chr
            .entry(region.chr.as_str())
            .or_default()
            .push(Interval {
                start: region.start,
                end: region.end,
                val: idx,
            });
    }

    let mut indexes: HashMap<&str, AIList<u32, usize>> = HashMap::default();
    for (chr, intervals) in by_chr {
        indexes.insert(chr, AIList::build(intervals));
    }

    let left_columns = ["Chromosome", "Start", "End", "Name", "te_kind", "bed_idx"];
    let right_columns = ["Start", "End", "Name", "te_kind", "bed_idx"];

    let mut columns: Vec<String> = left_columns.iter().map(|c| c.to_string()).collect();
    columns.extend(
        right_columns
            .iter()
            .map(|c| format!("{}{}", c, PAIR_SUFFIX)),
    );

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, region) in region_set.regions.iter().enumerate() {
        let Some(ailist) = indexes.get(region.chr.as_str()) else {
            continue;
        };

        let mut hits = ailist.find(region.start, region.end);
        hits.sort_by_key(|hit| hit.val);

        for hit in hits {
            let other = &region_set.regions[hit.val];
            rows.push(vec![
                region.chr.clone(),
                region.start.to_string(),
                region.end.to_string(),
                region.name().unwrap_or(MISSING_FIELD).to_string(),
                region.category().unwrap_or(MISSING_FIELD).to_string(),
                idx.to_string(),
                other.start.to_string(),
                other.end.to_string(),
                other.name().unwrap_or(MISSING_FIELD).to_string(),
                other.category().unwrap_or(MISSING_FIELD).to_string(),
                hit.val.to_string(),
            ]);
        }
    }

    SelfOverlapReport {
        columns,
        rows,
        region_count: region_set.len(),
        chrom_count: region_set.iter_chroms().count(),
    }
}
