//! Folder compression

use crate::archive;
use crate::progress::{Progress, ProgressSink};
use crate::{CancelToken, Error, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;
use zip::ZipWriter;

/// Aggregate outcome of one compression run
#[derive(Debug)]
pub struct CompressReport {
    /// The archive that was written
    pub output: PathBuf,
    /// Number of files successfully added
    pub added: usize,
    /// Files that could not be added, with the error for each
    pub failed: Vec<(PathBuf, Error)>,
}

/// Compress `folder` into a single zip archive.
///
/// The default output path is `<parent>/<folder name>.zip`; a pre-existing
/// archive at the output path is deleted first, so compression always
/// starts fresh. Entry names preserve the relative directory structure
/// with forward-slash separators. A file that cannot be added is recorded
/// and the rest of the folder is still processed. Cancellation is checked
/// between files, not mid-file.
pub fn compress_folder(
    folder: &Path,
    output: Option<PathBuf>,
    sink: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<CompressReport> {
    if !folder.is_dir() {
        return Err(Error::NotFound(folder.to_path_buf()));
    }
    cancel.check()?;

    let output = match output {
        Some(path) => path,
        None => default_output_path(folder)?,
    };

    if output.exists() {
        fs::remove_file(&output)?;
        debug!("Deleted existing archive {:?}", output);
    }

    // Collect the file list up front so progress has a stable total and
    // the output file we are about to create cannot feed back into the walk.
    let mut files = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&output)?;
    let mut zip = ZipWriter::new(file);

    let total = files.len();
    let mut report = CompressReport {
        output: output.clone(),
        added: 0,
        failed: Vec::new(),
    };

    for (index, path) in files.iter().enumerate() {
        cancel.check()?;

        sink.report(Progress::of(
            index + 1,
            total,
            format!("Compressing {}.", path.display()),
        ));

        let entry_name = entry_name_for(folder, path)?;
        match archive::add_file_entry(&mut zip, path, &entry_name) {
            Ok(()) => report.added += 1,
            Err(err) => {
                error!("Failed to add {:?} to archive: {}", path, err);
                report.failed.push((path.clone(), err));
            }
        }
    }

    zip.finish()?;
    info!("Created archive {:?} from folder {:?}", output, folder);
    Ok(report)
}

fn default_output_path(folder: &Path) -> Result<PathBuf> {
    let name = folder
        .file_name()
        .ok_or_else(|| Error::InvalidPath(format!("{:?} has no folder name", folder)))?;
    let parent = folder.parent().unwrap_or(folder);
    Ok(parent.join(format!("{}.zip", name.to_string_lossy())))
}

/// Relative entry name with forward slashes, regardless of host platform.
fn entry_name_for(base: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).map_err(|_| {
        Error::InvalidPath(format!("{:?} is outside the folder {:?}", path, base))
    })?;
    Ok(relative.to_string_lossy().replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_lands_next_to_the_folder() {
        let output = default_output_path(Path::new("/data/models/dragon")).unwrap();
        assert_eq!(output, Path::new("/data/models/dragon.zip"));
    }

    #[test]
    fn entry_names_use_forward_slashes() {
        let name = entry_name_for(
            Path::new("/data/models"),
            Path::new("/data/models/sub/part.stl"),
        )
        .unwrap();
        assert_eq!(name, "sub/part.stl");
    }
}
