use std::io;
use thiserror::Error;

/// Error type for repkit-io operations.
#[derive(Error, Debug)]
pub enum BedIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The given path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// The file name has no stem to rewrite names with.
    #[error("File has no usable stem: {0}")]
    NoFileStem(String),
}

/// Result type alias for repkit-io operations.
pub type Result<T> = std::result::Result<T, BedIoError>;
