use std::fmt::{self, Display};

use crate::utils::te_category;

///
/// Region struct, representation of one region in a BED-like annotation file
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub rest: Option<String>,
}

impl Region {
    ///
    /// Get length of the region in nucleotides
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.chr,
            self.start,
            self.end,
            self.rest
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }

    ///
    /// The `name` column (column 4) of the annotation, when present.
    ///
    /// For repeat annotations this carries the full annotation label,
    /// e.g. `LTR/Gypsy:Chr01:12345`.
    ///
    pub fn name(&self) -> Option<&str> {
        self.rest.as_deref().map(|rest| match rest.find('\t') {
            Some(idx) => &rest[..idx],
            None => rest,
        })
    }

    ///
    /// The repeat category of this region: the name up to its first `:`,
    /// or the whole name when there is no colon. `None` when the region
    /// has no name column.
    ///
    pub fn category(&self) -> Option<&str> {
        self.name().map(te_category)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
