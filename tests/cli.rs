use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const TABLE: &str = "\
Country Code,Row Id,Indicator Name,Indicator Code,1960,1961
ESP,ESP,Gini index,SI.POV.GINI,34,45
FRA,FRA,Gini index,SI.POV.GINI,31,
";

fn datafile() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("WDI_Data.csv");
    std::fs::write(&path, TABLE).unwrap();
    (dir, path)
}

fn run_json(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("wdiq").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wdiq"));
}

#[test]
fn cli_lists_actions() {
    let mut cmd = Command::cargo_bin("wdiq").unwrap();
    cmd.arg("actions");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gini-count"))
        .stdout(predicate::str::contains("unemp-min"))
        .stdout(predicate::str::contains("pib-count").not());
}

#[test]
fn cli_query_prints_found_value() {
    let (_d, path) = datafile();
    let mut cmd = Command::cargo_bin("wdiq").unwrap();
    cmd.args(["query", "--action", "gini", "--country", "ESP", "--data"])
        .arg(&path);
    let v = run_json(&mut cmd);
    assert_eq!(v["ok"], true);
    assert!((v["value"].as_f64().unwrap() - 0.45).abs() < 1e-9);
    assert!(v["error"].is_null());
}

#[test]
fn cli_query_reports_error_kind() {
    let (_d, path) = datafile();
    let mut cmd = Command::cargo_bin("wdiq").unwrap();
    cmd.args(["query", "--action", "gini-avg", "--year", "soon", "--data"])
        .arg(&path);
    let v = run_json(&mut cmd);
    assert_eq!(v["ok"], false);
    assert_eq!(v["error"], "invalid_year");
}

#[test]
fn cli_request_accepts_json_query() {
    let (_d, path) = datafile();
    let mut cmd = Command::cargo_bin("wdiq").unwrap();
    cmd.args([
        "request",
        r#"{"indicator":"gini","mode":"count_for_year","year":1961}"#,
        "--data",
    ])
    .arg(&path);
    let v = run_json(&mut cmd);
    assert_eq!(v["ok"], true);
    assert_eq!(v["value"].as_f64(), Some(1.0));
}

#[test]
fn cli_rejects_unknown_action() {
    let (_d, path) = datafile();
    let mut cmd = Command::cargo_bin("wdiq").unwrap();
    cmd.args(["query", "--action", "pib-count", "--data"]).arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));
}
