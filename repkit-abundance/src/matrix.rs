use std::collections::BTreeSet;

use fxhash::FxHashMap as HashMap;

use repkit_core::models::RegionSet;
use repkit_core::utils::te_category;

use crate::load::OverlapRecord;

///
/// Sum annotation span per TE category.
///
/// The category is the name column up to its first `:`; regions without a
/// name column do not contribute.
///
pub fn category_totals(regions: &RegionSet) -> HashMap<String, u64> {
    let mut totals: HashMap<String, u64> = HashMap::default();
    for region in regions {
        if let Some(category) = region.category() {
            *totals.entry(category.to_string()).or_default() += region.width() as u64;
        }
    }
    totals
}

///
/// Sum annotation span per satellite family (the full name column).
///
pub fn family_totals(regions: &RegionSet) -> HashMap<String, u64> {
    let mut totals: HashMap<String, u64> = HashMap::default();
    for region in regions {
        if let Some(name) = region.name() {
            *totals.entry(name.to_string()).or_default() += region.width() as u64;
        }
    }
    totals
}

///
/// A TE-category-by-satellite-family matrix of overlap spans.
///
/// Built by pivoting the overlap records: rows are TE categories, columns are
/// satellite families, both sorted; cells with no overlap record are zero.
/// [`AbundanceMatrix::normalize_rows`] turns raw spans into fractions of the
/// row category's total annotated length.
///
#[derive(Debug, Clone)]
pub struct AbundanceMatrix {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl AbundanceMatrix {
    ///
    /// Pivot overlap records into a category-by-family matrix.
    ///
    /// Records are grouped by (TE category, satellite family) and their
    /// overlap lengths summed, so the result does not depend on record
    /// order.
    ///
    pub fn from_overlaps(records: &[OverlapRecord]) -> Self {
        let mut sums: HashMap<(String, String), u64> = HashMap::default();
        let mut row_labels: BTreeSet<String> = BTreeSet::new();
        let mut col_labels: BTreeSet<String> = BTreeSet::new();

        for record in records {
            let category = te_category(&record.te_kind).to_string();
            row_labels.insert(category.clone());
            col_labels.insert(record.satellite.clone());
            *sums
                .entry((category, record.satellite.clone()))
                .or_default() += record.overlap_length;
        }

        let row_labels: Vec<String> = row_labels.into_iter().collect();
        let col_labels: Vec<String> = col_labels.into_iter().collect();

        let values = row_labels
            .iter()
            .map(|row| {
                col_labels
                    .iter()
                    .map(|col| {
                        sums.get(&(row.clone(), col.clone()))
                            .copied()
                            .unwrap_or(0) as f64
                    })
                    .collect()
            })
            .collect();

        AbundanceMatrix {
            row_labels,
            col_labels,
            values,
        }
    }

    ///
    /// Normalize each row by its category's total annotated span.
    ///
    /// Cells become `overlap / total`; a row whose category is missing from
    /// `totals`, or whose total is zero, becomes all zeros.
    ///
    pub fn normalize_rows(&mut self, totals: &HashMap<String, u64>) {
        for (row_idx, row_label) in self.row_labels.iter().enumerate() {
            let total = totals.get(row_label).copied().unwrap_or(0);
            for value in &mut self.values[row_idx] {
                *value = match total {
                    0 => 0.0,
                    total => *value / total as f64,
                };
            }
        }
    }

    /// Cell value by labels, `None` when either label is absent.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let row_idx = self.row_labels.iter().position(|l| l == row)?;
        let col_idx = self.col_labels.iter().position(|l| l == col)?;
        Some(self.values[row_idx][col_idx])
    }

    /// Largest cell value, zero for an empty matrix.
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flat_map(|row| row.iter())
            .fold(0.0f64, |a, &b| a.max(b))
    }

    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.col_labels.is_empty()
    }
}
