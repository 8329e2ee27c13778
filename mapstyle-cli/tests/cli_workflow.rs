//! Integration tests for the mapstyle CLI.
//!
//! These tests run the compiled binary against themes and resources written
//! to temporary directories:
//! - `validate` on valid, invalid and resource-broken themes
//! - `inspect` printing recorded primitives
//! - `scale-bar` reporting values and writing a PNG
//!
//! Run with: `cargo test -p mapstyle-cli --test cli_workflow`

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

/// Run a CLI command with logging redirected into `log_dir`.
fn run_cli(log_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mapstyle"))
        .args(args)
        .arg("--log-dir")
        .arg(log_dir)
        .output()
        .expect("Failed to execute CLI command")
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("{} failed:\nstdout: {}\nstderr: {}", context, stdout, stderr);
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_theme(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("theme.ini");
    std::fs::write(&path, text).unwrap();
    path
}

const THEME: &str = "\
[area.park]
cat = parks
fill = #FFC8FACC
stroke = #FF000000
stroke-width = 1

[symbol.peak]
id = peak
src = peak.png

[caption.peak]
k = name
symbol-id = peak
font-size = 12
";

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_lists_instructions() {
    let temp = TempDir::new().unwrap();
    let theme = write_theme(temp.path(), THEME);

    let output = run_cli(temp.path(), &["validate", theme.to_str().unwrap()]);
    assert_success(&output, "validate");

    let out = stdout(&output);
    assert!(out.contains("Instructions:      3"), "{out}");
    assert!(out.contains("area.park"));
    assert!(out.contains("(cat=parks)"));
    assert!(temp.path().join("mapstyle.log").exists());
}

#[test]
fn test_validate_rejects_bad_attribute() {
    let temp = TempDir::new().unwrap();
    let theme = write_theme(temp.path(), "[line]\nstroke-width = wide\n");

    let output = run_cli(temp.path(), &["validate", theme.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("stroke-width"));
}

#[test]
fn test_validate_reports_missing_resources() {
    let temp = TempDir::new().unwrap();
    let theme = write_theme(temp.path(), THEME);

    let output = run_cli(
        temp.path(),
        &["validate", theme.to_str().unwrap(), "--check-resources"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("peak.png"));

    image::RgbaImage::from_pixel(16, 16, image::Rgba([0, 0, 0, 255]))
        .save(temp.path().join("peak.png"))
        .unwrap();
    let output = run_cli(
        temp.path(),
        &["validate", theme.to_str().unwrap(), "--check-resources"],
    );
    assert_success(&output, "validate --check-resources");
    assert!(stdout(&output).contains("All resources decoded"));
}

// ============================================================================
// inspect
// ============================================================================

#[test]
fn test_inspect_prints_caption() {
    let temp = TempDir::new().unwrap();
    let theme = write_theme(temp.path(), THEME);

    let output = run_cli(
        temp.path(),
        &[
            "inspect",
            theme.to_str().unwrap(),
            "--zoom",
            "15",
            "--tag",
            "name=Zugspitze",
        ],
    );
    assert_success(&output, "inspect");
    assert!(stdout(&output).contains("poi-caption \"Zugspitze\""));
}

#[test]
fn test_inspect_way_with_category_filter() {
    let temp = TempDir::new().unwrap();
    let theme = write_theme(temp.path(), THEME);

    let output = run_cli(
        temp.path(),
        &[
            "inspect",
            theme.to_str().unwrap(),
            "--kind",
            "way",
            "--category",
            "forests",
        ],
    );
    assert_success(&output, "inspect --category");
    let out = stdout(&output);
    assert!(out.contains("Instructions applied: 2 of 3"), "{out}");
    assert!(!out.contains("area "));
}

// ============================================================================
// scale-bar
// ============================================================================

#[test]
fn test_scale_bar_reports_values() {
    let temp = TempDir::new().unwrap();
    let png = temp.path().join("bar.png");

    let output = run_cli(
        temp.path(),
        &[
            "scale-bar",
            "--lat",
            "52.5",
            "--zoom",
            "12",
            "--size",
            "400x300",
            "--output",
            png.to_str().unwrap(),
        ],
    );
    assert_success(&output, "scale-bar");

    let out = stdout(&output);
    assert!(out.contains("Primary:   2 km (85 px)"), "{out}");
    assert!(out.contains("Secondary: 1 mi"), "{out}");
    let decoded = image::open(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 300));
}

#[test]
fn test_scale_bar_rejects_bad_unit() {
    let temp = TempDir::new().unwrap();
    let output = run_cli(
        temp.path(),
        &["scale-bar", "--lat", "0", "--zoom", "3", "--unit", "furlong"],
    );
    assert!(!output.status.success());
}
