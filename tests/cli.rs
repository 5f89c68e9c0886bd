// tests/cli.rs
//! Integration tests for the smlgen binary.
//!
//! These tests shell out to the compiled binary and verify end-to-end behavior.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use smlgen::manifest::{MANIFEST_FILE, Manifest};

fn smlgen_bin() -> &'static str {
    env!("CARGO_BIN_EXE_smlgen")
}

fn run(args: &[&str], out: &Path) -> Output {
    Command::new(smlgen_bin())
        .args(args)
        .arg("--output")
        .arg(out)
        .output()
        .expect("failed to run smlgen")
}

fn sml_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".sml"))
        .collect();
    names.sort();
    names
}

#[test]
fn binary_writes_programs_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--count", "6", "--seed", "99"], dir.path());
    assert!(output.status.success(), "{:?}", output);

    let files = sml_files(dir.path());
    assert_eq!(files.len(), 6, "{files:?}");

    let manifest = Manifest::read_from_dir(dir.path()).unwrap();
    assert_eq!(manifest.count, 6);
    assert_eq!(manifest.seed, 99);
    assert_eq!(manifest.selector, "mixed");
    assert_eq!(manifest.profile, "default");

    for (i, entry) in manifest.files.iter().enumerate() {
        assert_eq!(entry.seed, 99 + i as i64);
        // File names carry the base seed; per-fixture seeds live in the manifest.
        assert_eq!(
            entry.file,
            format!("Program_{}_{}_99.sml", i + 1, entry.length)
        );
        let text = fs::read_to_string(dir.path().join(&entry.file)).unwrap();
        assert_eq!(text.chars().count(), entry.length);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 6 file(s)"), "{stdout}");
}

#[test]
fn binary_rejects_zero_count() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--count", "0"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--count"), "got: {stderr}");
}

#[test]
fn binary_rejects_unknown_profile() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--profile", "gigantic", "--seed", "1"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gigantic"), "got: {stderr}");
}

#[test]
fn no_manifest_flag_skips_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["-n", "2", "-s", "5", "--no-manifest"], dir.path());
    assert!(output.status.success());
    assert_eq!(sml_files(dir.path()).len(), 2);
    assert!(!dir.path().join(MANIFEST_FILE).exists());
}

#[test]
fn same_seed_same_files() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    let args = ["-n", "5", "-s", "-31", "-c", "complex"];
    assert!(run(&args, a.path()).status.success());
    assert!(run(&args, b.path()).status.success());

    let files = sml_files(a.path());
    assert_eq!(files, sml_files(b.path()));
    for file in files {
        assert_eq!(
            fs::read_to_string(a.path().join(&file)).unwrap(),
            fs::read_to_string(b.path().join(&file)).unwrap()
        );
    }
}

#[test]
fn missing_seed_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["-n", "1", "-c", "minimal"], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Using random seed:"), "{stdout}");
}

#[test]
fn output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let output = run(&["-n", "1", "-s", "0", "-p", "tiny"], &nested);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(sml_files(&nested).len(), 1);
}
