use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;

/// Column holding the full TE annotation name in the overlap table.
pub const TE_KIND_COL: &str = "TE_Kind";
/// Column holding the satellite family name in the overlap table.
pub const SATELLITE_COL: &str = "Satellite_Name";
/// Column holding the overlap span in nucleotides.
pub const OVERLAP_LEN_COL: &str = "Overlap_Length";

/// One row of the precomputed TE/satellite overlap table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapRecord {
    pub te_kind: String,
    pub satellite: String,
    pub overlap_length: u64,
}

///
/// Read the precomputed overlap table (comma-separated, with header).
///
/// The table must carry at least the `TE_Kind`, `Satellite_Name` and
/// `Overlap_Length` columns; extra columns are ignored.
///
pub fn read_overlap_table(path: &Path) -> Result<Vec<OverlapRecord>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open overlap table: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse overlap table: {}", path.display()))?;

    let te_kind = df.column(TE_KIND_COL)?.cast(&DataType::String)?;
    let te_kind = te_kind.str()?;
    let satellite = df.column(SATELLITE_COL)?.cast(&DataType::String)?;
    let satellite = satellite.str()?;
    let overlap_length = df.column(OVERLAP_LEN_COL)?.cast(&DataType::UInt64)?;
    let overlap_length = overlap_length.u64()?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let (Some(te_kind), Some(satellite), Some(overlap_length)) = (
            te_kind.get(idx),
            satellite.get(idx),
            overlap_length.get(idx),
        ) else {
            bail!(
                "Overlap table row {} of {} has missing fields",
                idx,
                path.display()
            );
        };

        records.push(OverlapRecord {
            te_kind: te_kind.to_string(),
            satellite: satellite.to_string(),
            overlap_length,
        });
    }

    Ok(records)
}
