//! Nested-folder flattening
//!
//! Extracting an archive named `Foo.zip` routinely produces `Foo/Foo/...`.
//! This module collapses such a child directory into its parent whenever
//! the two share a name, merging the child's contents up one level.

use crate::{CancelToken, Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Collapse same-named child directories into their parents, bottom-up.
///
/// Children are fully processed before their own parent-child name check,
/// so a chain like `Foo/Foo/Foo` collapses completely in one pass. Name
/// comparison is case-insensitive.
pub fn flatten_tree(root: &Path, cancel: &CancelToken) -> Result<()> {
    if !root.is_dir() {
        return Err(Error::NotFound(root.to_path_buf()));
    }

    info!("Flattening nested folders under {:?}", root);
    process_directory(root, cancel)
}

fn process_directory(dir: &Path, cancel: &CancelToken) -> Result<()> {
    // Snapshot the child list before recursing; merges below mutate this
    // level while we iterate.
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            children.push(entry.path());
        }
    }
    children.sort();

    for child in children {
        cancel.check()?;
        process_directory(&child, cancel)?;
        flatten_if_matching(dir, &child)?;
    }

    Ok(())
}

fn flatten_if_matching(parent: &Path, child: &Path) -> Result<()> {
    if !same_name(parent, child) {
        return Ok(());
    }

    debug!("Merging {:?} into {:?}", child, parent);
    merge_into(child, parent)?;

    // The merge must have emptied the child; anything left behind means a
    // move silently failed, and a recursive delete here would destroy it.
    if fs::read_dir(child)?.next().is_some() {
        return Err(Error::NonEmptyDirectory(child.to_path_buf()));
    }
    fs::remove_dir(child)?;

    Ok(())
}

fn same_name(a: &Path, b: &Path) -> bool {
    match (a.file_name(), b.file_name()) {
        (Some(a), Some(b)) => {
            a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
        }
        _ => false,
    }
}

/// Move every entry of `child` up into `parent`. A name already present in
/// the parent is a collision and aborts the merge; no overwrite policy is
/// applied.
fn merge_into(child: &Path, parent: &Path) -> Result<()> {
    for entry in fs::read_dir(child)? {
        let entry = entry?;
        let from = entry.path();
        let to = parent.join(entry.file_name());

        if to.exists() {
            return Err(Error::MergeCollision { from, to });
        }
        fs::rename(&from, &to)?;
    }
    Ok(())
}
