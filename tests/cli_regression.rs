// Regression tests for the arkparse binary.
// Requires: assert_cmd, predicates, tempfile crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::tempdir;

#[test]
fn cli_prints_forms() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("ok.ark");
    fs::write(&file, "# demo\n(let x 5)\n(if true \"yes\" \"no\")\n").unwrap();

    let mut cmd = Command::cargo_bin("arkparse").unwrap();
    cmd.arg("ast").arg(&file);
    cmd.assert()
        .success()
        .stdout(contains("(let x 5)").and(contains("(if true \"yes\" \"no\")")));
}

#[test]
fn cli_prints_json() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("ok.ark");
    fs::write(&file, "(del x)").unwrap();

    let mut cmd = Command::cargo_bin("arkparse").unwrap();
    cmd.args(["ast", "--format", "json"]).arg(&file);
    cmd.assert()
        .success()
        .stdout(contains("\"Keyword\"").and(contains("\"del\"")));
}

#[test]
fn cli_reports_miette_diagnostics_on_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad.ark");
    fs::write(&file, "(let x" /* missing value and closing paren */).unwrap();

    let mut cmd = Command::cargo_bin("arkparse").unwrap();
    cmd.arg("ast").arg(&file);
    cmd.assert()
        .failure()
        .stderr(contains("arkparse::parse").and(contains("Expected a value")));
}

#[test]
fn cli_check_reports_each_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("good.ark"), "(let x 1)(del x)").unwrap();
    fs::write(dir.path().join("bad.ark"), "(bogus)").unwrap();
    fs::write(dir.path().join("skip.txt"), "(bogus)").unwrap();

    let mut cmd = Command::cargo_bin("arkparse").unwrap();
    cmd.arg("check").arg(dir.path());
    cmd.assert()
        .failure()
        .stdout(contains("good.ark (2 forms)").and(contains("2 checked, 1 failed")))
        .stderr(contains("Couldn't parse node"));
}

#[test]
fn cli_missing_file_fails() {
    let mut cmd = Command::cargo_bin("arkparse").unwrap();
    cmd.arg("ast").arg("does/not/exist.ark");
    cmd.assert().failure().stderr(contains("arkparse::io"));
}
