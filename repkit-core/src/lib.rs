//! Core library for repkit: shared models and IO utilities for working with
//! repeat-annotation interval data (transposable elements, satellites, HORs).
//!
//! The main entry points are [`models::RegionSet`], the in-memory
//! representation of a BED-like annotation file, and the helpers in
//! [`utils`] for reading plain or gzip'd files and deriving repeat category
//! labels from annotation names.

pub mod errors;
pub mod models;
pub mod utils;
