use assert_cmd::prelude::*;
use predicates::str::{contains, is_match};
use std::process::Command;

#[test]
fn demo_prints_results_in_submission_order() {
    Command::cargo_bin("taskpool-demo")
        .unwrap()
        .args(["--threads", "2", "--tasks", "4", "--delay-ms", "20"])
        .assert()
        .success()
        .stdout(is_match(r"(?s)result: 1\n.*result: 2\n.*result: 3\n.*result: 4\n").unwrap());
}

#[test]
fn demo_runs_with_defaults() {
    Command::cargo_bin("taskpool-demo")
        .unwrap()
        .assert()
        .success()
        .stdout(contains("result: 1"))
        .stderr(contains("Finished in"));
}

#[test]
fn demo_rejects_unknown_flag() {
    Command::cargo_bin("taskpool-demo")
        .unwrap()
        .arg("--bogus")
        .assert()
        .failure();
}

#[test]
fn demo_version() {
    Command::cargo_bin("taskpool-demo")
        .unwrap()
        .arg("-V")
        .assert()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}
