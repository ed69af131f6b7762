//! Fixture file and settings tests.

use std::fs;

use fw::config::{RuntimeConfig, Settings};
use fw::device::DeviceCatalog;
use fw::error::FwError;
use fw::store::{self, StoreSource};
use fw::wheel::{WheelController, WheelState};

use crate::common::fixtures::{FIRST_MOUSE, FixtureFile, LOGITECH, SECOND_MOUSE, root};

#[test]
fn fixture_toggle_is_saved() {
    let fixture = FixtureFile::office();
    let source = StoreSource::Fixture(fixture.path.clone());

    {
        let store = store::open(&source).unwrap();
        let mice = DeviceCatalog::new(store.as_ref(), root()).load_mice().unwrap();
        let controller = WheelController::new(store.as_ref(), root());
        assert_eq!(controller.toggle(&mice[0]).unwrap(), WheelState::Flipped);
    }

    assert_eq!(fixture.wheel(LOGITECH, FIRST_MOUSE), Some(1));
    assert_eq!(fixture.wheel(LOGITECH, SECOND_MOUSE), Some(1));

    let mice = DeviceCatalog::new(&fixture.reload(), root()).load_mice().unwrap();
    assert_eq!(mice.len(), 3);
    assert_eq!(mice[0].friendly_name(), "HID-compliant mouse");
}

#[test]
fn toml_fixture_loads() {
    let fixture = FixtureFile::create(
        "devices.toml",
        r#"
root = 'HID'

[[keys]]
name = "VID_1"

[[keys.keys]]
name = "A"
values = { DeviceDesc = "@mouhid.inf,%t%;Toml mouse" }

[[keys.keys.keys]]
name = "Device Parameters"
values = { FlipFlopWheel = 1 }
"#,
    );
    let store = store::open(&StoreSource::Fixture(fixture.path.clone())).unwrap();
    let hid = fw::store::StorePath::parse("HID");
    let mice = DeviceCatalog::new(store.as_ref(), hid.clone()).load_mice().unwrap();
    let controller = WheelController::new(store.as_ref(), hid);

    assert_eq!(mice[0].friendly_name(), "Toml mouse");
    assert_eq!(controller.resolve(&mice[0]).unwrap(), WheelState::Flipped);
}

#[test]
fn broken_fixture_is_reported() {
    let fixture = FixtureFile::create("devices.yaml", "keys: [unterminated");
    let err = store::open(&StoreSource::Fixture(fixture.path.clone()))
        .err()
        .unwrap();
    assert!(matches!(err, FwError::FixtureParse { .. }));
}

#[test]
fn missing_fixture_is_reported() {
    let fixture = FixtureFile::office();
    let missing = fixture.home().join("gone.yaml");
    let err = store::open(&StoreSource::Fixture(missing)).err().unwrap();
    assert!(err.to_string().contains("gone.yaml"));
}

#[cfg(not(windows))]
#[test]
fn system_store_is_unsupported_off_windows() {
    let err = store::open(&StoreSource::System).err().unwrap();
    assert!(matches!(err, FwError::UnsupportedPlatform));
    assert!(err.suggestion().unwrap().contains("--store"));
}

#[test]
fn settings_point_at_fixture() {
    let fixture = FixtureFile::office();
    let settings_path = fixture.home().join("settings.yaml");
    fs::write(&settings_path, "store: devices.yaml\n").unwrap();

    let settings = Settings::load(&settings_path).unwrap();
    let config = RuntimeConfig::resolve(&settings, None, None);
    assert_eq!(config.source, StoreSource::Fixture(fixture.path.clone()));
    assert_eq!(config.root, root());

    let store = store::open(&config.source).unwrap();
    let mice = DeviceCatalog::new(store.as_ref(), config.root).load_mice().unwrap();
    assert_eq!(mice.len(), 3);
}

#[test]
fn unknown_settings_key_is_rejected() {
    let fixture = FixtureFile::office();
    let settings_path = fixture.home().join("config.toml");
    fs::write(&settings_path, "colour = \"red\"\n").unwrap();

    let err = Settings::load(&settings_path).unwrap_err();
    assert!(matches!(err, FwError::ConfigParse(_)));
}
