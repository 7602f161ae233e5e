//! Archive discovery, extraction, and the decompression workflow

use crate::progress::{Progress, ProgressSink};
use crate::{archive, flatten};
use crate::{CancelToken, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// The single archive extension the scanner looks for
const ARCHIVE_EXTENSION: &str = "zip";

/// Outcome of one scan-and-decompress pass
#[derive(Debug, Default)]
pub struct Decompression {
    /// Files written by extraction, in extraction order
    pub extracted: Vec<PathBuf>,
    /// The original archives that were processed, in scan order
    pub archives: Vec<PathBuf>,
}

/// Options for [`run_workflow`]
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowOptions {
    /// Delete the original archives once extraction and flattening are done
    pub delete_archives: bool,
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
        .unwrap_or(false)
}

/// Recursively find every archive under `root`, in deterministic order.
pub fn scan_archives(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotFound(root.to_path_buf()));
    }

    let mut archives = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_archive(entry.path()) {
            archives.push(entry.into_path());
        }
    }

    Ok(archives)
}

/// Extract every archive under `root` into a sibling folder named after
/// the archive's stem.
///
/// Fails with [`Error::NoArchivesFound`] when the root exists but holds no
/// archives. One progress event is emitted per archive; cancellation is
/// checked before each archive.
pub fn scan_and_decompress(
    root: &Path,
    sink: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<Decompression> {
    let archives = scan_archives(root)?;
    if archives.is_empty() {
        return Err(Error::NoArchivesFound(root.to_path_buf()));
    }

    let total = archives.len();
    let mut outcome = Decompression::default();

    for (index, archive_path) in archives.iter().enumerate() {
        cancel.check()?;

        sink.report(Progress::of(
            index + 1,
            total,
            format!("Decompressing {}.", archive_path.display()),
        ));

        let stem = archive_path.file_stem().ok_or_else(|| {
            Error::InvalidPath(format!("{:?} has no file stem", archive_path))
        })?;
        let output = archive_path.parent().unwrap_or(root).join(stem);

        let written = archive::extract_zip(archive_path, &output, cancel)?;
        outcome.extracted.extend(written);
        outcome.archives.push(archive_path.clone());
    }

    info!(
        "Decompressed {} file(s) from {} archive(s)",
        outcome.extracted.len(),
        outcome.archives.len()
    );
    Ok(outcome)
}

/// Run the full decompression workflow against `root`.
///
/// Strict order: extract everything, then flatten the nested folders the
/// extraction produced, then optionally delete the original archives.
/// Flattening never runs if extraction failed. Cleanup is best-effort per
/// archive and never fails the workflow; the extracted file list is
/// returned regardless of cleanup outcome.
pub fn run_workflow(
    root: &Path,
    options: WorkflowOptions,
    sink: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<Vec<PathBuf>> {
    info!("Starting decompression workflow for {:?}", root);

    let outcome = scan_and_decompress(root, sink, cancel)?;

    cancel.check()?;
    flatten::flatten_tree(root, cancel)?;
    info!("Completed folder flattening for {:?}", root);

    if options.delete_archives {
        let failed = delete_archives(&outcome.archives, cancel)?;
        if !failed.is_empty() {
            warn!("{} archive(s) could not be deleted", failed.len());
        }
    }

    Ok(outcome.extracted)
}

/// Delete each archive, continuing past individual failures. Returns the
/// paths that could not be deleted.
pub fn delete_archives(archives: &[PathBuf], cancel: &CancelToken) -> Result<Vec<PathBuf>> {
    let mut failed = Vec::new();

    for path in archives {
        cancel.check()?;
        match fs::remove_file(path) {
            Ok(()) => info!("Deleted archive {:?}", path),
            Err(err) => {
                error!("Failed to delete archive {:?}: {}", path, err);
                failed.push(path.clone());
            }
        }
    }

    Ok(failed)
}
