use std::mem::swap;

use num_traits::{PrimInt, Unsigned};

use super::Overlapper;
use repkit_core::models::Interval;

/// An Augmented Interval List for efficient genomic interval overlap queries.
///
/// From the following article: <https://academic.oup.com/bioinformatics/article/35/23/4907/5509521>
///
/// The AIList decomposes its input into a small number of sublists in which
/// interval ends are mostly non-decreasing, then augments each sublist with a
/// running maximum end. Queries binary-search each sublist and walk backwards
/// until the running maximum rules out further hits. Repeat annotations are
/// exactly the kind of high-coverage input the decomposition is meant for:
/// satellite arrays produce long runs of nested and stacked intervals.
///
/// # Examples
///
/// ```
/// use repkit_overlaprs::{AIList, Overlapper, Interval};
///
/// // monomers of a satellite array, val is the source row index
/// let monomers = vec![
///     Interval { start: 1000u32, end: 2000, val: 0usize },
///     Interval { start: 1500, end: 2500, val: 1 },
///     Interval { start: 5000, end: 6000, val: 2 },
/// ];
///
/// let ailist = AIList::build(monomers);
///
/// let overlaps = ailist.find(1800, 2200);
/// assert_eq!(overlaps.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AIList<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    starts: Vec<I>,
    ends: Vec<I>,
    max_ends: Vec<I>,
    header_list: Vec<usize>,
    stored_intervals: Vec<Interval<I, T>>,
}

/// Storage for the intermediate results from [`AIList::decompose`].
#[derive(Debug, Default)]
struct DecomposeResult<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Start positions.
    starts: Vec<I>,
    /// End positions.
    ends: Vec<I>,
    /// The max end position seen up to this index.
    max_ends: Vec<I>,
    /// The associated Interval.
    stored_intervals: Vec<Interval<I, T>>,
    /// The remaining intervals to be decomposed.
    l2: Vec<Interval<I, T>>,
}

impl<I, T> DecomposeResult<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Clear the contents, maintaining capacity.
    fn clear(&mut self) {
        self.starts.clear();
        self.ends.clear();
        self.max_ends.clear();
        self.stored_intervals.clear();
        self.l2.clear();
    }

    /// Create an empty [`DecomposeResult`] with the given `cap` capacity.
    fn with_capacity(cap: usize) -> Self {
        Self {
            starts: Vec::with_capacity(cap),
            ends: Vec::with_capacity(cap),
            max_ends: Vec::with_capacity(cap),
            stored_intervals: Vec::with_capacity(cap),
            l2: Vec::with_capacity(cap),
        }
    }
}

impl<I, T> Overlapper<I, T> for AIList<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    ///
    /// Create a new AIList struct
    ///
    /// # Arguments
    /// - intervals: list of intervals to create from
    ///
    /// # Returns
    /// - AIList struct
    fn build(intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized,
    {
        let mut intervals = intervals;
        intervals.sort_by_key(|key| key.start);

        let mut starts = Vec::with_capacity(intervals.len());
        let mut ends = Vec::with_capacity(intervals.len());
        let mut max_ends = Vec::with_capacity(intervals.len());
        let mut stored_intervals = Vec::with_capacity(intervals.len());

        // Scratch space for construction. The scratch vecs get drained into
        // the final vectors on each pass, but their capacity is kept, so no
        // re-allocation happens between decomposition rounds.
        let mut results = DecomposeResult::with_capacity(intervals.len());

        let mut header_list = vec![0];

        loop {
            Self::decompose(&intervals, 10, &mut results);

            starts.append(&mut results.starts);
            ends.append(&mut results.ends);
            max_ends.append(&mut results.max_ends);
            stored_intervals.append(&mut results.stored_intervals);
            swap(&mut intervals, &mut results.l2);

            if intervals.is_empty() {
                break;
            } else {
                header_list.push(starts.len());
            }
        }

        AIList {
            starts,
            ends,
            max_ends,
            header_list,
            stored_intervals,
        }
    }

    fn find(&self, start: I, end: I) -> Vec<Interval<I, T>> {
        let mut results_list = Vec::new();

        for i in 0..(self.header_list.len() - 1) {
            results_list.append(&mut Self::query_slice(
                start,
                end,
                &self.starts[self.header_list[i]..self.header_list[i + 1]],
                &self.ends[self.header_list[i]..self.header_list[i + 1]],
                &self.max_ends[self.header_list[i]..self.header_list[i + 1]],
                &self.stored_intervals[self.header_list[i]..self.header_list[i + 1]],
            ));
        }
        // now do the last decomposed sublist
        let i = self.header_list.len() - 1;
        results_list.extend(Self::query_slice(
            start,
            end,
            &self.starts[self.header_list[i]..],
            &self.ends[self.header_list[i]..],
            &self.max_ends[self.header_list[i]..],
            &self.stored_intervals[self.header_list[i]..],
        ));

        results_list
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        stop: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        Box::new(IterFind::new(self, start, stop))
    }
}

impl<I, T> AIList<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn decompose(
        intervals: &[Interval<I, T>],
        minimum_coverage_length: usize,
        scratch: &mut DecomposeResult<I, T>,
    ) {
        scratch.clear();

        for (index, interval) in intervals.iter().enumerate() {
            let mut count = 0;
            for i in 1..(minimum_coverage_length * 2) {
                match intervals.get(index + i) {
                    Some(interval2) => {
                        if interval.end > interval2.end {
                            count += 1;
                        }
                    }
                    None => break,
                }
            }
            if count >= minimum_coverage_length {
                scratch.l2.push(Interval {
                    start: interval.start,
                    end: interval.end,
                    val: interval.val.clone(),
                });
            } else {
                scratch.starts.push(interval.start);
                scratch.ends.push(interval.end);
                scratch.stored_intervals.push(interval.clone());
            }
        }

        let mut max: I = I::zero();

        for end in scratch.ends.iter() {
            max = if max > *end { max } else { *end };
            scratch.max_ends.push(max);
        }
    }

    fn query_slice(
        start: I,
        end: I,
        starts: &[I],
        ends: &[I],
        max_ends: &[I],
        stored_intervals: &[Interval<I, T>],
    ) -> Vec<Interval<I, T>> {
        let mut results_list = Vec::new();
        let mut i = starts.partition_point(|&x| x < end);

        while i > 0 {
            i -= 1;
            // maintain start inclusive, end exclusive
            if start >= ends[i] {
                // no intersection here; the running max tells us whether
                // anything further left can still intersect
                if start > max_ends[i] {
                    return results_list;
                }
            } else {
                results_list.push(stored_intervals[i].clone())
            }
        }
        results_list
    }

    /// Returns the number of intervals in the AIList.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Returns `true` if the AIList contains no intervals.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// An iterator over intervals in an [`AIList`] that overlap a query range.
///
/// Created by [`find_iter`](Overlapper::find_iter). Lazily yields references
/// to overlapping intervals, traversing the decomposed sublists without
/// allocating a result vector.
#[derive(Debug)]
pub struct IterFind<'a, I, T>
where
    T: Eq + Clone + Send + Sync + 'a,
    I: PrimInt + Unsigned + Send + Sync,
{
    inner: &'a AIList<I, T>,
    header_list_idx: usize,
    list_idx: Option<usize>,
    start: I,
    stop: I,
}

impl<'a, I, T> IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync + 'a,
    T: Eq + Clone + Send + Sync,
{
    fn new(ailist: &'a AIList<I, T>, start: I, stop: I) -> Self {
        Self {
            inner: ailist,
            header_list_idx: 0,
            list_idx: None,
            start,
            stop,
        }
    }
}

impl<'a, I, T> Iterator for IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    type Item = &'a Interval<I, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.header_list_idx < self.inner.header_list.len() {
            let range = if self.header_list_idx == self.inner.header_list.len() - 1 {
                // is last
                self.inner.header_list[self.header_list_idx]..self.inner.starts.len()
            } else {
                self.inner.header_list[self.header_list_idx]
                    ..self.inner.header_list[self.header_list_idx + 1]
            };
            let starts = &self.inner.starts[range.clone()];
            let ends = &self.inner.ends[range.clone()];
            let max_ends = &self.inner.max_ends[range.clone()];
            let stored_intervals = &self.inner.stored_intervals[range.clone()];

            let i = if let Some(list_idx) = self.list_idx.as_mut() {
                list_idx
            } else {
                self.list_idx = Some(starts.partition_point(|&x| x < self.stop));
                self.list_idx.as_mut().unwrap()
            };

            while *i > 0 {
                *i -= 1;
                // maintain start inclusive, end exclusive
                if self.start >= ends[*i] {
                    // no further intersection in this sublist
                    if self.start > max_ends[*i] {
                        break;
                    }
                } else {
                    return Some(&stored_intervals[*i]);
                }
            }
            self.list_idx = None;
            self.header_list_idx += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn monomers() -> Vec<Interval<u32, usize>> {
        vec![
            Interval {
                start: 1,
                end: 5,
                val: 0,
            },
            Interval {
                start: 3,
                end: 7,
                val: 1,
            },
            Interval {
                start: 6,
                end: 10,
                val: 2,
            },
            Interval {
                start: 8,
                end: 12,
                val: 3,
            },
        ]
    }

    #[rstest]
    fn test_build_and_len(monomers: Vec<Interval<u32, usize>>) {
        let ailist = AIList::build(monomers.clone());
        assert_eq!(ailist.len(), monomers.len());
        assert!(!ailist.is_empty());
    }

    #[rstest]
    fn test_find_overlapping_intervals(monomers: Vec<Interval<u32, usize>>) {
        let ailist = AIList::build(monomers);

        let mut vals: Vec<usize> = ailist.find(2, 4).iter().map(|i| i.val).collect();
        vals.sort();
        assert_eq!(vals, vec![0, 1]);

        let mut vals: Vec<usize> = ailist.find(9, 11).iter().map(|i| i.val).collect();
        vals.sort();
        assert_eq!(vals, vec![2, 3]);
    }

    #[rstest]
    fn test_find_no_overlap(monomers: Vec<Interval<u32, usize>>) {
        let ailist = AIList::build(monomers);
        assert!(ailist.find(13, 15).is_empty());
    }

    #[rstest]
    fn test_empty_ailist() {
        let ailist: AIList<u32, usize> = AIList::build(vec![]);

        assert_eq!(ailist.len(), 0);
        assert!(ailist.is_empty());
        assert!(ailist.find(1, 2).is_empty());
    }

    #[rstest]
    fn test_find_iter_matches_find(monomers: Vec<Interval<u32, usize>>) {
        let ailist = AIList::build(monomers);

        for (start, end) in [(2, 4), (5, 8), (9, 11), (0, 15), (7, 9), (13, 15)] {
            let find_results = ailist.find(start, end);
            let find_iter_results: Vec<&Interval<u32, usize>> =
                ailist.find_iter(start, end).collect();

            assert_eq!(
                find_results.len(),
                find_iter_results.len(),
                "Mismatch in number of results for query ({}, {})",
                start,
                end
            );
            for interval in &find_results {
                assert!(find_iter_results.contains(&interval));
            }
        }
    }

    #[rstest]
    fn test_many_nested_intervals_decompose() {
        // enough stacked intervals to force a second decomposition pass
        let intervals: Vec<Interval<u32, usize>> = (0..50)
            .map(|i| Interval {
                start: 100,
                end: 1000 - i as u32,
                val: i,
            })
            .collect();

        let ailist = AIList::build(intervals);
        assert_eq!(ailist.len(), 50);
        assert_eq!(ailist.find(500, 501).len(), 50);
        assert_eq!(ailist.find(960, 1000).len(), 40);
    }
}
