//! Testing utilities and fixtures for sorta
//!
//! This crate provides a temporary-directory wrapper and fixture builders
//! shared by the sorta test suites.

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub mod fixtures;

/// Creates a temporary test directory with cleanup on drop
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Creates a new temporary test directory
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Returns the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a file with the given name and content, creating parent
    /// directories as needed
    pub fn create_file(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Creates a directory with the given name in the test directory
    pub fn create_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Writes a real zip archive at `name` (parents created as needed)
    /// holding the given (entry name, content) pairs. Entry names use
    /// forward slashes.
    pub fn create_zip(&self, name: &str, entries: &[(&str, &[u8])]) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::File::create(&path)?;
        let mut zip = ZipWriter::new(file);
        for (entry_name, content) in entries {
            let options = FileOptions::<'static, ()>::default()
                .compression_method(CompressionMethod::Deflated);
            zip.start_file(*entry_name, options)?;
            zip.write_all(content)?;
        }
        zip.finish()?;

        Ok(path)
    }
}
