//! Human-mode end-to-end tests.

use predicates::prelude::*;

use crate::common::cli::fw;
use crate::common::fixtures::{FIRST_MOUSE, FixtureFile, LOGITECH};

#[test]
fn list_prints_table() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .args(["--store", fixture.path_str(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configurable devices:"))
        .stdout(predicate::str::contains("WHEEL DIRECTION"))
        .stdout(predicate::str::contains("HID-compliant mouse"))
        .stdout(predicate::str::contains("Flipped"))
        .stdout(predicate::str::contains("Unknown"))
        .stdout(predicate::str::contains("HID Keyboard Device").not())
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn ls_alias_works() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .args(["--store", fixture.path_str(), "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains(FIRST_MOUSE));
}

#[test]
fn toggle_prints_transition() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .args(["--store", fixture.path_str(), "toggle", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Normal -> Flipped"));
    assert_eq!(fixture.wheel(LOGITECH, FIRST_MOUSE), Some(1));
}

#[test]
fn bad_index_prints_hint() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .args(["--store", fixture.path_str(), "toggle", "first"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("\"first\""))
        .stderr(predicate::str::contains("Hint: Run: fw list"));
}

#[test]
fn empty_store_has_no_mice() {
    let fixture = FixtureFile::create("devices.yaml", "keys: []\n");
    fw(fixture.home())
        .args(["--store", fixture.path_str(), "toggle", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No mice found"));
}

#[test]
fn version_is_plain_text() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("fw "))
        .stdout(predicate::str::contains("target:"));
}

#[test]
fn completions_are_generated() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_fw"));
}
