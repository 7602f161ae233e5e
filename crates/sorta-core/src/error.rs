//! Error types for sorta-core

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for the sorta library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP-specific error
    #[error("Zip error: {0}")]
    Zip(String),

    /// Target directory or file is absent
    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The directory exists but holds no archives to extract.
    /// Distinct from [`Error::NotFound`] so callers can tell a missing
    /// directory from a present-but-empty one.
    #[error("No archives found under: {}", .0.display())]
    NoArchivesFound(PathBuf),

    /// Merging a nested folder into its parent would overwrite an
    /// existing entry
    #[error("Merge collision: {} would overwrite {}", .from.display(), .to.display())]
    MergeCollision { from: PathBuf, to: PathBuf },

    /// A directory that should have been emptied by a merge still has
    /// entries in it
    #[error("Directory not empty after merge: {}", .0.display())]
    NonEmptyDirectory(PathBuf),

    /// Invalid file or directory path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The operation was cancelled by the caller. Not a failure; reported
    /// separately from error outcomes.
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error for other cases
    #[error("Other error: {0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
