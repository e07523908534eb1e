// Runs the built binary against datasets written to a temp dir.
use std::{path::PathBuf, process::Command};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_bike-rentals");
    Command::new(exe)
}

fn write_dataset(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("alquileres.csv");
    std::fs::write(&path, contents).expect("write dataset");
    path
}

const HEADER: &str = "name,id,start_date,end_date,station,bike_type,price_per_day,services\n";

#[test]
fn prints_report_for_dataset() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_dataset(
        &temp,
        &format!(
            "{HEADER}\
             Ana,123,2024-01-01,2024-01-04,Central,Urban,5.0,gps,lock\n\
             Luis,456,2024-01-05,2024-01-11,Norte,Electric,10.0,lock\n"
        ),
    );

    let output = cmd().arg(&path).output().expect("run");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.starts_with("Dataset: "));
    assert!(stdout.contains("alquileres.csv"));
    assert!(stdout.contains("rentals: 2\n"));
    assert!(stdout.contains("total billed 2024-01-01..2024-01-04: 15.00\n"));
    assert!(stdout.contains("top billing customer: 456 (60.00)\n"));
}

#[test]
fn malformed_row_fails_load() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_dataset(
        &temp,
        &format!("{HEADER}Ana,123,2024-13-01,2024-01-04,Central,Urban,5.0,gps\n"),
    );

    let output = cmd().arg(&path).output().expect("run");

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(!stdout.contains("rentals:"));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("line 2"));
    assert!(stderr.contains("2024-13-01"));
}

#[test]
fn missing_dataset_fails() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = cmd()
        .arg(temp.path().join("missing.csv"))
        .output()
        .expect("run");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("cannot read"));
}

#[test]
fn bundled_dataset_is_default() {
    let output = cmd().output().expect("run");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("data/alquileres.csv") || stdout.contains("data\\alquileres.csv"));
    assert!(stdout.contains("rentals: 7\n"));
}
