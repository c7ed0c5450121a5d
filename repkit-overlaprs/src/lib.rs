//! Interval overlap structures for repkit.
//!
//! This crate provides the overlap machinery the repkit tools share: an
//! Augmented Interval List ([`AIList`]) for overlap queries over one
//! chromosome's worth of intervals, and the [`diagnostics`] module, which
//! overlaps an annotation file against itself and reports how the joined
//! pair table names its columns.
//!
//! ## Quick Start
//!
//! ```rust
//! use repkit_overlaprs::{AIList, Overlapper, Interval};
//!
//! // satellite monomers on one chromosome
//! let intervals = vec![
//!     Interval { start: 100u32, end: 200, val: 0usize },
//!     Interval { start: 150, end: 300, val: 1 },
//!     Interval { start: 400, end: 500, val: 2 },
//! ];
//!
//! let ailist = AIList::build(intervals);
//!
//! let overlaps = ailist.find(180, 250);
//! assert_eq!(overlaps.len(), 2);
//! ```

/// Augmented Interval List implementation.
///
/// See [`AIList`] for details.
pub mod ailist;

/// Self-overlap diagnostics for annotation files.
///
/// See [`diagnostics::self_overlap`] for the entry point.
pub mod diagnostics;

/// Core traits for overlap operations.
///
/// See [`Overlapper`] for the main trait.
pub mod traits;

// re-exports
pub use self::ailist::AIList;
pub use self::traits::{Interval, Overlapper};
