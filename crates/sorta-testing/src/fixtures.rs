//! Common test fixtures for sorta testing

use crate::TestDir;
use anyhow::Result;
use std::path::PathBuf;

/// Creates a tree with images scattered across several levels plus one
/// non-image file.
pub fn create_scattered_images(test_dir: &TestDir) -> Result<()> {
    test_dir.create_file("cover.jpg", &[0xFF, 0xD8, 0xFF, 0xE0])?;
    test_dir.create_file("parts/diagram.png", b"\x89PNG\r\n")?;
    test_dir.create_file("parts/deep/render.webp", b"RIFF")?;
    test_dir.create_file("parts/readme.txt", b"not an image")?;
    Ok(())
}

/// Creates a duplicate-name chain like `name/name/name` of the given depth,
/// with one marker file at the deepest level. Returns the marker file path.
pub fn create_nested_duplicate_tree(
    test_dir: &TestDir,
    name: &str,
    depth: usize,
) -> Result<PathBuf> {
    let mut dir = PathBuf::from(name);
    for _ in 1..depth {
        dir = dir.join(name);
    }
    let marker = dir.join("marker.txt");
    test_dir.create_file(marker.to_str().expect("fixture path is valid UTF-8"), b"deep")
}
