use assert_cmd::prelude::*;
use eustat_viz::{Indicator, Record, storage};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_dataset(dir: &Path) -> PathBuf {
    let mut rows = Vec::new();
    for (year, sv, pop, pib) in [(2019, 81.6, 11_455_519.0, 36_500.0), (2020, 80.8, 11_522_440.0, 34_600.0)] {
        rows.push(Record::new("BE", year, Indicator::Sv, sv));
        rows.push(Record::new("BE", year, Indicator::Pop, pop));
        rows.push(Record::new("BE", year, Indicator::Pib, pib));
    }
    let path = dir.join("dataset.json");
    storage::save_json(&rows, &path).unwrap();
    path
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("eustat").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("eustat"))
        .stdout(predicate::str::contains("animate"));
}

#[test]
fn line_chart_from_saved_dataset() {
    let dir = tempdir().unwrap();
    let data = write_dataset(dir.path());
    let out = dir.path().join("be_sv.svg");

    let mut cmd = Command::cargo_bin("eustat").unwrap();
    cmd.args(["line", "-c", "BE", "-i", "sv", "--data"])
        .arg(&data)
        .arg("--out")
        .arg(&out);
    cmd.assert().success();
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn line_chart_without_country_fails_before_loading() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("eustat").unwrap();
    cmd.args(["line", "-i", "SV", "--data", "does-not-exist.json", "--out"])
        .arg(dir.path().join("x.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no country selected"));
}

#[test]
fn unknown_indicator_is_reported() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("eustat").unwrap();
    cmd.args(["line", "-c", "BE", "-i", "CO2", "--out"])
        .arg(dir.path().join("x.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown indicator"));
}

#[test]
fn bubble_chart_for_missing_year_reports_no_data() {
    let dir = tempdir().unwrap();
    let data = write_dataset(dir.path());
    let mut cmd = Command::cargo_bin("eustat").unwrap();
    cmd.args(["bubble", "-y", "1990", "--data"])
        .arg(&data)
        .arg("--out")
        .arg(dir.path().join("b.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no data for year 1990"));
}

#[test]
fn animate_writes_one_frame_per_year() {
    let dir = tempdir().unwrap();
    let data = write_dataset(dir.path());
    let frames = dir.path().join("frames");

    let mut cmd = Command::cargo_bin("eustat").unwrap();
    cmd.args(["animate", "--delay-ms", "0", "--data"])
        .arg(&data)
        .arg("--out-dir")
        .arg(&frames);
    cmd.assert().success();
    assert!(frames.join("bubble_2019.svg").exists());
    assert!(frames.join("bubble_2020.svg").exists());
}

#[test]
fn stats_from_csv_dataset() {
    let dir = tempdir().unwrap();
    let json = write_dataset(dir.path());
    let csv = dir.path().join("dataset.csv");
    storage::save_csv(&storage::load(&json).unwrap(), &csv).unwrap();

    let mut cmd = Command::cargo_bin("eustat").unwrap();
    cmd.args(["stats", "--data"]).arg(&csv);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("BE • SV  count=2 years=2019..2020"));
}
