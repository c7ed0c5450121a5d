use std::collections::HashSet;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use anyhow::Result;
use std::io::BufRead;

use crate::errors::RegionSetError;
use crate::models::Region;
use crate::utils::get_dynamic_reader;

///
/// RegionSet struct, the representation of an interval annotation file,
/// such as a bed file.
///
#[derive(Clone, Debug)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

pub struct RegionSetIterator<'a> {
    region_set: &'a RegionSet,
    index: usize,
}

impl TryFrom<&Path> for RegionSet {
    type Error = anyhow::Error;

    ///
    /// Create a new [RegionSet] from a bed or bed.gz file.
    ///
    /// Regions keep the order they have in the file; callers that need
    /// coordinate order call [RegionSet::sort].
    ///
    /// # Arguments:
    /// - value: path to bed file on disk.
    fn try_from(value: &Path) -> Result<Self> {
        let path = value;

        if !path.is_file() {
            return Err(RegionSetError::FileReadError(path.display().to_string()).into());
        }
        let reader = get_dynamic_reader(path)?;

        let mut new_regions: Vec<Region> = Vec::new();
        let mut header: String = String::new();
        let mut first_line: bool = true;

        for line in reader.lines() {
            let string_line = line?;

            let parts: Vec<String> = string_line.split('\t').map(|s| s.to_string()).collect();

            if string_line.starts_with("browser")
                | string_line.starts_with("track")
                | string_line.starts_with("#")
            {
                header.push_str(&string_line);
                first_line = false;
                continue;
            }

            // Handling column headers like `chr start end etc` without #
            if first_line {
                if parts.len() >= 3 && parts[1].parse::<u32>().is_err() {
                    header.push_str(&string_line);
                    first_line = false;
                    continue;
                }
                first_line = false;
            }

            if parts.len() < 3 {
                return Err(RegionSetError::RegionParseError(format!(
                    "expected at least 3 columns, got {}: {:?}",
                    parts.len(),
                    parts
                ))
                .into());
            }

            let start = parts[1].parse().map_err(|_| {
                RegionSetError::RegionParseError(format!(
                    "can't parse start position: {:?}",
                    parts
                ))
            })?;
            let end = parts[2].parse().map_err(|_| {
                RegionSetError::RegionParseError(format!("can't parse end position: {:?}", parts))
            })?;

            new_regions.push(Region {
                chr: parts[0].to_owned(),
                start,
                end,
                rest: Some(parts[3..].join("\t")).filter(|s| !s.is_empty()),
            });
        }

        if new_regions.is_empty() {
            return Err(RegionSetError::EmptyRegionSet(path.display().to_string()).into());
        }

        Ok(RegionSet {
            regions: new_regions,
            header: match header.is_empty() {
                true => None,
                false => Some(header),
            },
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = anyhow::Error;

    fn try_from(value: PathBuf) -> Result<Self> {
        RegionSet::try_from(value.as_path())
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            header: None,
            path: None,
        }
    }
}

impl<'a> Iterator for RegionSetIterator<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.region_set.regions.len() {
            let region = &self.region_set.regions[self.index];
            self.index += 1;
            Some(region)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = RegionSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        RegionSetIterator {
            region_set: self,
            index: 0,
        }
    }
}

impl RegionSet {
    ///
    /// Sort regions on first 3 columns.
    /// Sorting is happening inside the object,
    /// where original order will be overwritten
    ///
    pub fn sort(&mut self) {
        self.regions
            .sort_by(|a, b| a.chr.cmp(&b.chr).then_with(|| a.start.cmp(&b.start)));
    }

    ///
    /// Is regionSet empty?
    ///
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    ///
    /// Get number of regions in RegionSet
    ///
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    ///
    /// Iterate unique chromosomes located in RegionSet
    ///
    pub fn iter_chroms(&self) -> impl Iterator<Item = &String> {
        let unique_chroms: HashSet<&String> = self.regions.iter().map(|r| &r.chr).collect();
        unique_chroms.into_iter()
    }

    ///
    /// Get total nucleotide count
    ///
    pub fn nucleotides_length(&self) -> u64 {
        let mut total_count: u64 = 0;
        for r in &self.regions {
            total_count += r.width() as u64;
        }
        total_count
    }
}

impl Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionSet with {} regions.", self.len())
    }
}
