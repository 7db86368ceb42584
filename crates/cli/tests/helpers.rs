use std::fs;

use asset_salvage::{resolve_output_root, verbosity_filter};
use tempfile::tempdir;

#[test]
fn output_root_for_dot_is_the_working_directory() {
    let result = resolve_output_root(".").expect("resolve");
    let cwd = std::env::current_dir().expect("cwd").canonicalize().expect("canon cwd");
    assert_eq!(result, cwd);
}

#[test]
fn existing_output_root_is_canonicalized() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = resolve_output_root(&subdir.to_string_lossy()).expect("resolve nested");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn missing_absolute_output_root_is_kept() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("not-created").join("out");
    let result = resolve_output_root(&missing.to_string_lossy()).expect("resolve");
    assert_eq!(result, missing);
}

#[test]
fn missing_relative_output_root_joins_working_directory() {
    let result = resolve_output_root("does-not-exist-yet/out").expect("resolve");
    assert!(result.is_absolute());
    assert!(result.ends_with("does-not-exist-yet/out"));
}

#[test]
fn verbosity_maps_counts_to_levels() {
    assert_eq!(verbosity_filter(0), "warn");
    assert_eq!(verbosity_filter(1), "info");
    assert_eq!(verbosity_filter(2), "debug");
    assert_eq!(verbosity_filter(9), "debug");
}
