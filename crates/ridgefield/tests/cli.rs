use assert_cmd::Command;
use predicates::prelude::*;
use ridgefield::core::{CoordAxis, LatLonGrid};
use ridgefield::hessian::{load_grid_json, write_grid_json, RidgeDetectReport};
use std::path::Path;

fn write_ridge(path: &Path) {
    let grid = LatLonGrid::from_fn(
        CoordAxis::linspace("latitude", -5.0, 1.0, 11),
        CoordAxis::linspace("longitude", 0.0, 1.0, 21),
        |_, lon| (-(lon - 10.0).powi(2) / 2.0).exp(),
    )
    .expect("grid");
    write_grid_json(&grid, path).expect("write grid");
}

fn ridgefield() -> Command {
    Command::cargo_bin("ridgefield").expect("binary")
}

#[test]
fn detect_from_flags_writes_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("ridge.json");
    let output = dir.path().join("report.json");
    write_ridge(&input);

    ridgefield()
        .arg("detect")
        .arg("--input")
        .arg(&input)
        .arg("--no-smooth")
        .arg("--angle")
        .arg("5")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("ridge points: 9 of 171 valid"));

    let report = RidgeDetectReport::load_json(&output).expect("report");
    assert_eq!(report.params.sigma, None);
    let mask = LatLonGrid::try_from(report.mask.expect("mask")).expect("mask grid");
    assert_eq!(mask.shape(), (9, 19));
    let crest = mask.lon.values.iter().position(|&l| l == 10.0).expect("crest");
    assert!(mask.column(crest).iter().all(|&m| m == 1.0));
}

#[test]
fn detect_from_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("ridge.json");
    let output = dir.path().join("report.json");
    let config = dir.path().join("run.json");
    write_ridge(&input);
    let cfg = serde_json::json!({
        "input_path": input,
        "output_path": output,
        "scheme": "second_order",
        "sigma": 1.0,
    });
    std::fs::write(&config, cfg.to_string()).expect("write config");

    ridgefield()
        .args(["detect", "-v", "--config"])
        .arg(&config)
        .assert()
        .success();

    let report = RidgeDetectReport::load_json(&output).expect("report");
    assert_eq!(report.params.sigma, Some(1.0));
    let mask = LatLonGrid::try_from(report.mask.expect("mask")).expect("mask grid");
    assert_eq!(mask.shape(), (10, 20));
}

#[test]
fn unknown_scheme_fails_before_reading_input() {
    ridgefield()
        .args(["detect", "--input", "does-not-exist.json", "--scheme", "upwind"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scheme `upwind`"));
}

#[test]
fn detect_requires_input_or_config() {
    ridgefield().arg("detect").assert().failure();
}

#[test]
fn crop_writes_open_box() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("ridge.json");
    let output = dir.path().join("box.json");
    write_ridge(&input);

    ridgefield()
        .arg("crop")
        .arg("--input")
        .arg(&input)
        .args(["--lat-min", "-3", "--lat-max", "3", "--lon-min", "5", "--lon-max", "15"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("cropped to 5x9"));

    let cropped = load_grid_json(&output).expect("cropped grid");
    assert_eq!(cropped.lat.values, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    assert_eq!(cropped.lon.values.first(), Some(&6.0));
    assert_eq!(cropped.lon.values.last(), Some(&14.0));
}
