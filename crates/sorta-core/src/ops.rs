//! Operation selection and dispatch

use crate::compress;
use crate::decompress::{self, WorkflowOptions};
use crate::images;
use crate::progress::ProgressSink;
use crate::{CancelToken, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// The closed set of operations the tool can run against a directory.
///
/// Dispatch is an exhaustive match; an unknown operation is not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Extract every archive under the directory and flatten the result
    DecompressArchives,
    /// Compress the directory into a single archive
    CompressFolder,
    /// Collect scattered images into an `Images/` subfolder
    ExtractImages,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::DecompressArchives => "Decompress files",
            Operation::CompressFolder => "Compress folder",
            Operation::ExtractImages => "Extract images",
        };
        f.write_str(name)
    }
}

/// Structured result of one operation run. The `Display` impl renders the
/// human-readable summary the UI shows.
#[derive(Debug)]
pub enum Outcome {
    /// Archives were extracted and the tree flattened
    Decompressed {
        /// Files written by extraction
        extracted: Vec<PathBuf>,
    },
    /// A folder was compressed into an archive
    Compressed {
        /// The archive that was written
        archive: PathBuf,
    },
    /// Images were collected into the `Images/` subfolder
    ImagesOrganized {
        /// Files successfully copied
        copied: usize,
        /// Files whose copy failed
        failed: usize,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Decompressed { .. } => {
                write!(f, "Successfully extracted file(s) and flattened folders.")
            }
            Outcome::Compressed { archive } => {
                write!(f, "Successfully created archive: {}", archive.display())
            }
            Outcome::ImagesOrganized { copied, .. } => {
                write!(f, "Successfully copied {} image(s) to Images folder.", copied)
            }
        }
    }
}

/// Dispatch one operation against `path`.
///
/// `options` only affects [`Operation::DecompressArchives`]; the other
/// operations ignore it.
pub fn execute(
    operation: Operation,
    path: &Path,
    options: WorkflowOptions,
    sink: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<Outcome> {
    match operation {
        Operation::DecompressArchives => {
            let extracted = decompress::run_workflow(path, options, sink, cancel)?;
            Ok(Outcome::Decompressed { extracted })
        }
        Operation::CompressFolder => {
            let report = compress::compress_folder(path, None, sink, cancel)?;
            Ok(Outcome::Compressed {
                archive: report.output,
            })
        }
        Operation::ExtractImages => {
            let report = images::organize_images(path, cancel)?;
            Ok(Outcome::ImagesOrganized {
                copied: report.copied.len(),
                failed: report.failed.len(),
            })
        }
    }
}
