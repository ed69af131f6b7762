//! Environment variable and settings file end-to-end tests.

use std::fs;

use predicates::prelude::*;

use crate::common::cli::{fw, stdout_json};
use crate::common::fixtures::{FixtureFile, LOGITECH, SECOND_MOUSE};

#[test]
fn fw_store_env_selects_fixture() {
    let fixture = FixtureFile::office();
    let output = fw(fixture.home())
        .env("FW_STORE", fixture.path_str())
        .env("FW_FORMAT", "json")
        .arg("list")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 3);
}

#[test]
fn format_flag_overrides_env() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .env("FW_FORMAT", "json")
        .args(["--store", fixture.path_str(), "--format", "text", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configurable devices:"));
}

#[test]
fn fw_root_env_changes_catalog_root() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .env("FW_ROOT", r"SYSTEM\CurrentControlSet\Enum\USB")
        .args(["--store", fixture.path_str(), "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(r"Enum\USB"));
}

// Only Linux honors XDG_CONFIG_HOME for the config dir.
#[cfg(target_os = "linux")]
#[test]
fn default_settings_file_is_discovered() {
    let fixture = FixtureFile::office();
    let config_dir = fixture.home().join("flip_wheel");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!("store = '{}'\n", fixture.path_str()),
    )
    .unwrap();

    fw(fixture.home())
        .args(["--robot", "toggle", "1"])
        .assert()
        .success();
    assert_eq!(fixture.wheel(LOGITECH, SECOND_MOUSE), Some(0));
}

#[test]
fn explicit_missing_config_fails() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .args(["--config", "nowhere.toml", "--store", fixture.path_str(), "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn no_color_env_accepts_one() {
    let fixture = FixtureFile::office();
    fw(fixture.home())
        .env("NO_COLOR", "1")
        .args(["--store", fixture.path_str(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}
