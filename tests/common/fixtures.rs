//! Test fixture helpers for building device stores.
//!
//! The "office" layout used across tests is a keyboard, a device with two
//! mice (normal then flipped) and a mouse with no wheel value yet.

use std::fs;
use std::path::{Path, PathBuf};

use fw::store::{
    DEFAULT_ROOT, DEVICE_DESC, DEVICE_PARAMETERS, FLIP_FLOP_WHEEL, FixtureStore, MemoryStore,
    StoreKey, StorePath,
};
use tempfile::TempDir;

pub const MOUSE_DESC: &str = "@mouhid.inf,%hid.mousedevice%;HID-compliant mouse";
pub const KEYBOARD_DESC: &str = "@keyboard.inf,%hid.keyboarddevice%;HID Keyboard Device";

pub const KEYBOARD: &str = "VID_046D&PID_C31C";
pub const LOGITECH: &str = "VID_046D&PID_C077";
pub const RAZER: &str = "VID_1532&PID_0084";

pub const FIRST_MOUSE: &str = "7&2a1c6b55&0&0000";
pub const SECOND_MOUSE: &str = "7&2a1c6b55&0&0001";
pub const GAMING_MOUSE: &str = "8&3f0d1e&0&0000";

pub const OFFICE_YAML: &str = r#"
keys:
  - name: "VID_046D&PID_C31C"
    keys:
      - name: "7&1b2c&0&0000"
        values:
          DeviceDesc: "@keyboard.inf,%hid.keyboarddevice%;HID Keyboard Device"
  - name: "VID_046D&PID_C077"
    keys:
      - name: "7&2a1c6b55&0&0000"
        values:
          DeviceDesc: "@mouhid.inf,%hid.mousedevice%;HID-compliant mouse"
        keys:
          - name: Device Parameters
            values:
              FlipFlopWheel: 0
      - name: "7&2a1c6b55&0&0001"
        values:
          DeviceDesc: "@mouhid.inf,%t%;Second mouse"
        keys:
          - name: Device Parameters
            values:
              FlipFlopWheel: 1
  - name: "VID_1532&PID_0084"
    keys:
      - name: "8&3f0d1e&0&0000"
        values:
          DeviceDesc: "@mouhid.inf,%t%;Gaming mouse"
        keys:
          - name: Device Parameters
"#;

#[must_use]
pub fn root() -> StorePath {
    StorePath::parse(DEFAULT_ROOT)
}

/// Instance key with an optional descriptor and wheel value.
#[must_use]
pub fn instance(id: &str, desc: Option<&str>, wheel: Option<u32>) -> StoreKey {
    let mut key = StoreKey::new(id);
    if let Some(desc) = desc {
        key = key.with_value(DEVICE_DESC, desc);
    }
    let mut params = StoreKey::new(DEVICE_PARAMETERS);
    if let Some(value) = wheel {
        params = params.with_value(FLIP_FLOP_WHEEL, value);
    }
    key.with_key(params)
}

#[must_use]
pub fn device(id: &str, instances: Vec<StoreKey>) -> StoreKey {
    instances.into_iter().fold(StoreKey::new(id), StoreKey::with_key)
}

/// Memory store with `devices` mounted under the default root.
#[must_use]
pub fn store_with(devices: Vec<StoreKey>) -> MemoryStore {
    let store = MemoryStore::new();
    store.mount(&root(), devices);
    store
}

#[must_use]
pub fn office_store() -> MemoryStore {
    store_with(vec![
        device(
            KEYBOARD,
            vec![instance("7&1b2c&0&0000", Some(KEYBOARD_DESC), None)],
        ),
        device(
            LOGITECH,
            vec![
                instance(FIRST_MOUSE, Some(MOUSE_DESC), Some(0)),
                instance(SECOND_MOUSE, Some("@mouhid.inf,%t%;Second mouse"), Some(1)),
            ],
        ),
        device(
            RAZER,
            vec![instance(GAMING_MOUSE, Some("@mouhid.inf,%t%;Gaming mouse"), None)],
        ),
    ])
}

#[must_use]
pub fn params_path(device: &str, instance: &str) -> StorePath {
    root().join(device).join(instance).join(DEVICE_PARAMETERS)
}

/// A fixture file in a temporary directory with automatic cleanup.
///
/// The directory doubles as an empty config home for CLI runs.
pub struct FixtureFile {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl FixtureFile {
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn create(name: &str, content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        Self { dir, path }
    }

    #[must_use]
    pub fn office() -> Self {
        Self::create("devices.yaml", OFFICE_YAML)
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("temp path is UTF-8")
    }

    /// Reload the fixture from disk.
    #[must_use]
    pub fn reload(&self) -> FixtureStore {
        FixtureStore::load(&self.path).expect("Failed to reload fixture")
    }

    /// Current wheel value of an instance on disk.
    #[must_use]
    pub fn wheel(&self, device: &str, instance: &str) -> Option<u32> {
        self.reload()
            .memory()
            .integer(&params_path(device, instance), FLIP_FLOP_WHEEL)
    }
}
