//! Sorta - tidy up a directory tree of downloaded archives
//!
//! This library provides the three operations the tool offers: extracting
//! every archive under a directory and flattening the redundant nested
//! folders the extraction leaves behind, compressing a folder into a single
//! archive, and collecting scattered image files into one subfolder.

pub mod archive;
pub mod cancel;
pub mod compress;
pub mod decompress;
pub mod error;
pub mod flatten;
pub mod images;
pub mod ops;
pub mod progress;

pub use error::{Error, Result};

// Re-export commonly used types
pub use cancel::CancelToken;
pub use ops::{execute, Operation, Outcome};
pub use progress::{NoProgress, Progress, ProgressSink};
