//! # Input/Output utilities for repeat-annotation data.
//!
//! This small crate holds the file-rewriting side of repkit. Its main export
//! is the [`rename`] module, which rewrites the `name` column of bed files to
//! the file's own stem, so downstream joins can tell apart annotations that
//! came from different assemblies.

pub mod error;
pub mod rename;

// re-expose core functions
pub use error::*;
pub use rename::*;
