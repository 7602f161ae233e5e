//! Zip container boundary
//!
//! The only archive format sorta knows is the standard zip container, kept
//! readable by common third-party tools. Everything above this module works
//! in terms of entries; everything about the wire format lives here.

use crate::{CancelToken, Result};
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::FileOptions;
use zip::CompressionMethod;
use zip::{ZipArchive, ZipWriter};

/// Extract every entry of a zip archive into `dest`, creating it as
/// needed. Returns the paths of the files written, in entry order.
///
/// Cancellation is observed between entries; an in-flight entry write
/// completes before the cancellation takes effect.
pub fn extract_zip(archive_path: &Path, dest: &Path, cancel: &CancelToken) -> Result<Vec<PathBuf>> {
    info!("Extracting {:?} to {:?}", archive_path, dest);

    fs::create_dir_all(dest)?;

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        cancel.check()?;

        let mut entry = archive.by_index(i)?;
        let relative = match entry.enclosed_name() {
            Some(path) => path,
            None => {
                warn!("Skipping entry with unsafe name: {}", entry.name());
                continue;
            }
        };
        let dest_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest_path)?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!("Extracting: {:?}", dest_path);
        let mut outfile = File::create(&dest_path)?;
        io::copy(&mut entry, &mut outfile)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&dest_path, fs::Permissions::from_mode(mode))?;
            }
        }

        written.push(dest_path);
    }

    Ok(written)
}

/// Stream a single file into the archive under `name`.
pub(crate) fn add_file_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
) -> Result<()> {
    debug!("Adding file to archive: {:?} as {}", path, name);

    let mut file = File::open(path)?;

    let options =
        FileOptions::<'static, ()>::default().compression_method(CompressionMethod::Deflated);

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(file.metadata()?.permissions().mode())
    };

    zip.start_file(name, options)?;
    io::copy(&mut file, zip)?;

    Ok(())
}
