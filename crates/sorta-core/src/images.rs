//! Image discovery and collection
//!
//! Three pieces, layered: a finder that walks a tree for image files, a
//! copier that lands one file in a destination folder without clobbering
//! anything, and an organizer that drives both against a root directory.

use crate::{CancelToken, Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

/// Name of the destination folder created directly under the root
pub const IMAGES_DIR: &str = "Images";

/// Extensions recognised as images (matched case-insensitively)
const IMAGE_EXTENSIONS: [&str; 9] = [
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "svg",
];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Recursively collect image files under `root`, in deterministic order.
///
/// Directories listed in `exclude` are pruned from the walk. The finder
/// itself has no opinion about any particular folder name; exclusion
/// policy belongs to the caller. Enumeration errors propagate.
pub fn find_images(root: &Path, exclude: &[PathBuf], cancel: &CancelToken) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !exclude.iter().any(|dir| entry.path() == dir));

    for entry in walker {
        cancel.check()?;
        let entry = entry?;
        if entry.file_type().is_file() && is_image(entry.path()) {
            images.push(entry.into_path());
        }
    }

    Ok(images)
}

/// Copy `source` into `dest_dir`, keeping the original file name unless it
/// is already taken, in which case a `stem_N.ext` name is generated.
/// Never overwrites an existing file. Returns the path actually written.
pub fn copy_image(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| Error::InvalidPath(format!("{:?} has no file name", source)))?;

    let mut destination = dest_dir.join(file_name);
    if destination.exists() {
        destination = unique_destination(dest_dir, Path::new(file_name));
    }

    let mut reader = File::open(source)?;
    // create_new keeps the no-overwrite guarantee even if a file appears
    // between the probe above and this open.
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&destination)?;
    io::copy(&mut reader, &mut writer)?;

    Ok(destination)
}

/// Probe `stem_N.ext` names starting at N=1 until one is unused.
///
/// The counter is unbounded, matching the operation's contract; exhausting
/// a u32 would take ~4e9 same-named files in one directory.
fn unique_destination(dir: &Path, file_name: &Path) -> PathBuf {
    let stem = file_name.file_stem().unwrap_or_default().to_string_lossy();
    let extension = file_name.extension();
    let mut counter: u32 = 1;

    loop {
        let candidate = match extension {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext.to_string_lossy()),
            None => format!("{}_{}", stem, counter),
        };
        let candidate = dir.join(candidate);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Aggregate outcome of one organize run. The report, not the log, is the
/// authoritative record of what happened.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    /// Destination paths written, in copy order
    pub copied: Vec<PathBuf>,
    /// Source files whose copy failed, with the error that stopped each
    pub failed: Vec<(PathBuf, Error)>,
}

/// Collect every image under `root` into an `Images/` subfolder.
///
/// The destination folder is created idempotently and excluded from the
/// scan, so re-running against the same root never copies files already
/// inside `Images/` onto themselves. A failed copy is recorded and the
/// remaining files are still processed.
pub fn organize_images(root: &Path, cancel: &CancelToken) -> Result<OrganizeReport> {
    if !root.is_dir() {
        return Err(Error::NotFound(root.to_path_buf()));
    }
    cancel.check()?;

    let images_dir = root.join(IMAGES_DIR);
    fs::create_dir_all(&images_dir)?;

    let found = find_images(root, std::slice::from_ref(&images_dir), cancel)?;

    let mut report = OrganizeReport::default();
    for file in found {
        cancel.check()?;
        match copy_image(&file, &images_dir) {
            Ok(destination) => {
                debug!("Copied image {:?} to {:?}", file, destination);
                report.copied.push(destination);
            }
            Err(err) => {
                error!("Failed to copy image {:?}: {}", file, err);
                report.failed.push((file, err));
            }
        }
    }

    info!(
        "Organized {} image(s) into {:?}",
        report.copied.len(),
        images_dir
    );
    Ok(report)
}
