//! CLI behavior tests that never touch the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn clinicgate() -> Command {
    Command::cargo_bin("clinicgate").expect("binary builds")
}

#[test]
fn version_prints_package_version() {
    clinicgate()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn plan_is_deterministic_for_a_fixed_instant() {
    let dir = tempdir().unwrap();
    let run = || {
        clinicgate()
            .current_dir(dir.path())
            .args(["plan", "--at", "2025-06-15T12:00:00Z"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    let first = run();
    assert_eq!(first, run(), "same instant, same plan");

    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("Tuples (22):"));
    assert!(text.contains("Assertions (7):"));
    assert!(text.contains("(user:dentistExt1, practitioner, appointment:appt1)"));
    assert!(text.contains("Appointment window:   2025-06-15T11:00:00Z .. 2025-06-15T14:00:00Z"));
}

#[test]
fn plan_rejects_a_malformed_instant() {
    let dir = tempdir().unwrap();
    clinicgate()
        .current_dir(dir.path())
        .args(["plan", "--at", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ISO-8601"));
}

#[test]
fn run_fails_before_any_network_call_when_model_is_missing() {
    let dir = tempdir().unwrap();
    clinicgate()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("model"));
}

#[test]
fn unknown_subcommand_is_an_error() {
    clinicgate().arg("frobnicate").assert().failure();
}
