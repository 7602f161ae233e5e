use sorta_core::images::{copy_image, find_images, organize_images};
use sorta_core::{CancelToken, Error};
use sorta_testing::{fixtures, TestDir};
use std::fs;

#[test]
fn organize_collects_images_into_the_images_folder() {
    let test_dir = TestDir::new().unwrap();
    fixtures::create_scattered_images(&test_dir).unwrap();

    let report = organize_images(test_dir.path(), &CancelToken::new()).unwrap();

    assert_eq!(report.copied.len(), 3);
    assert!(report.failed.is_empty());
    assert!(test_dir.path().join("Images/cover.jpg").exists());
    assert!(test_dir.path().join("Images/diagram.png").exists());
    assert!(test_dir.path().join("Images/render.webp").exists());
    assert!(!test_dir.path().join("Images/readme.txt").exists());
}

#[test]
fn finder_matches_extensions_case_insensitively() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("PHOTO.JPG", b"upper").unwrap();
    test_dir.create_file("photo.jpg", b"lower").unwrap();

    let found = find_images(test_dir.path(), &[], &CancelToken::new()).unwrap();

    assert_eq!(found.len(), 2);
}

#[test]
fn finder_prunes_excluded_directories() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("keep/a.png", b"a").unwrap();
    test_dir.create_file("skip/b.png", b"b").unwrap();

    let exclude = vec![test_dir.path().join("skip")];
    let found = find_images(test_dir.path(), &exclude, &CancelToken::new()).unwrap();

    assert_eq!(found, vec![test_dir.path().join("keep/a.png")]);
}

#[test]
fn colliding_names_get_numbered_suffixes() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("one/c.gif", b"first").unwrap();
    test_dir.create_file("two/c.gif", b"second").unwrap();

    let report = organize_images(test_dir.path(), &CancelToken::new()).unwrap();

    assert_eq!(report.copied.len(), 2);
    assert!(test_dir.path().join("Images/c.gif").exists());
    assert!(test_dir.path().join("Images/c_1.gif").exists());
    // Walk order is deterministic, so one/ lands first under its own name.
    assert_eq!(
        fs::read(test_dir.path().join("Images/c.gif")).unwrap(),
        b"first"
    );
    assert_eq!(
        fs::read(test_dir.path().join("Images/c_1.gif")).unwrap(),
        b"second"
    );
}

#[test]
fn copy_probes_increasing_suffixes_until_unused() {
    let test_dir = TestDir::new().unwrap();
    let source = test_dir.create_file("src/d.bmp", b"new").unwrap();
    let dest = test_dir.create_dir("dest").unwrap();
    test_dir.create_file("dest/d.bmp", b"taken").unwrap();
    test_dir.create_file("dest/d_1.bmp", b"taken").unwrap();

    let written = copy_image(&source, &dest).unwrap();

    assert_eq!(written, dest.join("d_2.bmp"));
    assert_eq!(fs::read(&written).unwrap(), b"new");
    // Nothing was overwritten.
    assert_eq!(fs::read(dest.join("d.bmp")).unwrap(), b"taken");
}

#[test]
fn rerun_does_not_recopy_files_already_inside_images() {
    let test_dir = TestDir::new().unwrap();
    test_dir
        .create_file("Images/existing.png", b"already organized")
        .unwrap();

    let report = organize_images(test_dir.path(), &CancelToken::new()).unwrap();

    assert!(report.copied.is_empty());
    assert!(!test_dir.path().join("Images/existing_1.png").exists());
}

#[test]
fn missing_root_fails_without_writing() {
    let test_dir = TestDir::new().unwrap();
    let missing = test_dir.path().join("missing");

    let err = organize_images(&missing, &CancelToken::new()).unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(!missing.exists());
}

#[test]
fn cancellation_before_any_work_copies_nothing() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("a.jpg", b"a").unwrap();

    let cancel = CancelToken::new();
    cancel.cancel();

    let err = organize_images(test_dir.path(), &cancel).unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(!test_dir.path().join("Images").exists());
}

#[cfg(unix)]
#[test]
fn copy_failures_do_not_abort_the_batch() {
    use std::fs::File;
    use std::os::unix::fs::PermissionsExt;

    let test_dir = TestDir::new().unwrap();
    let blocked = test_dir.create_file("blocked.jpg", b"secret").unwrap();
    test_dir.create_file("readable.jpg", b"fine").unwrap();

    fs::set_permissions(&blocked, fs::Permissions::from_mode(0o000)).unwrap();
    if File::open(&blocked).is_ok() {
        // Privileged environments ignore file modes; the failure cannot be
        // provoked here.
        return;
    }

    let report = organize_images(test_dir.path(), &CancelToken::new()).unwrap();

    assert_eq!(report.copied.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, blocked);
    assert!(test_dir.path().join("Images/readable.jpg").exists());
}
