use sorta_core::flatten::flatten_tree;
use sorta_core::{CancelToken, Error};
use sorta_testing::{fixtures, TestDir};
use std::fs;

#[test]
fn duplicate_child_is_merged_into_its_parent() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("Foo/Foo/a.txt", b"content").unwrap();

    flatten_tree(test_dir.path(), &CancelToken::new()).unwrap();

    assert!(test_dir.path().join("Foo/a.txt").exists());
    assert!(!test_dir.path().join("Foo/Foo").exists());
}

#[test]
fn multi_level_chains_collapse_in_one_pass() {
    let test_dir = TestDir::new().unwrap();
    fixtures::create_nested_duplicate_tree(&test_dir, "Foo", 4).unwrap();

    flatten_tree(test_dir.path(), &CancelToken::new()).unwrap();

    assert!(test_dir.path().join("Foo/marker.txt").exists());
    assert!(!test_dir.path().join("Foo/Foo").exists());
}

#[test]
fn name_comparison_is_case_insensitive() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("Foo/FOO/a.txt", b"content").unwrap();

    flatten_tree(test_dir.path(), &CancelToken::new()).unwrap();

    assert!(test_dir.path().join("Foo/a.txt").exists());
    assert!(!test_dir.path().join("Foo/FOO").exists());
}

#[test]
fn subdirectories_are_carried_up_with_the_merge() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("Pack/Pack/parts/p.txt", b"part").unwrap();
    test_dir.create_file("Pack/Pack/top.txt", b"top").unwrap();

    flatten_tree(test_dir.path(), &CancelToken::new()).unwrap();

    assert!(test_dir.path().join("Pack/parts/p.txt").exists());
    assert!(test_dir.path().join("Pack/top.txt").exists());
    assert!(!test_dir.path().join("Pack/Pack").exists());
}

#[test]
fn differently_named_folders_are_left_alone() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("Foo/Bar/a.txt", b"content").unwrap();

    flatten_tree(test_dir.path(), &CancelToken::new()).unwrap();

    assert!(test_dir.path().join("Foo/Bar/a.txt").exists());
}

#[test]
fn merge_collision_surfaces_an_error_instead_of_overwriting() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("Foo/a.txt", b"parent copy").unwrap();
    test_dir.create_file("Foo/Foo/a.txt", b"child copy").unwrap();

    let err = flatten_tree(test_dir.path(), &CancelToken::new()).unwrap_err();

    assert!(matches!(err, Error::MergeCollision { .. }));
    // The parent's file survived untouched.
    assert_eq!(
        fs::read(test_dir.path().join("Foo/a.txt")).unwrap(),
        b"parent copy"
    );
}

#[test]
fn missing_root_fails_with_not_found() {
    let test_dir = TestDir::new().unwrap();
    let missing = test_dir.path().join("missing");

    let err = flatten_tree(&missing, &CancelToken::new()).unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn cancellation_leaves_the_tree_untouched() {
    let test_dir = TestDir::new().unwrap();
    test_dir.create_file("Foo/Foo/a.txt", b"content").unwrap();

    let cancel = CancelToken::new();
    cancel.cancel();

    let err = flatten_tree(test_dir.path(), &cancel).unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(test_dir.path().join("Foo/Foo/a.txt").exists());
}
