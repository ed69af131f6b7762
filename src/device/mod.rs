//! Device catalog for HID devices listed in the store.
//!
//! Devices are the keys directly under the catalog root; instances are
//! the keys under each device. Nothing is cached: every call re-reads the
//! store.

mod catalog;
pub mod descriptor;

pub use catalog::DeviceCatalog;
pub use descriptor::{DeviceDescription, MOUSE_DRIVER};

use serde::Serialize;

use crate::store::StorePath;

/// A root device key, e.g. `VID_046D&PID_C077`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
}

/// One instance of a [`Device`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInstance {
    /// Instance key name, unique within the parent device.
    pub id: String,
    /// Id of the owning device.
    pub parent_id: String,
    /// Parsed `DeviceDesc`, absent if missing or malformed.
    pub description: Option<DeviceDescription>,
}

impl DeviceInstance {
    /// Returns true if the instance has a mouse descriptor.
    #[must_use]
    pub fn is_mouse(&self) -> bool {
        self.description
            .as_ref()
            .is_some_and(DeviceDescription::is_mouse)
    }

    /// Display name from the descriptor, or an empty string.
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        self.description.as_ref().map_or("", |d| d.name.as_str())
    }

    /// Path of the instance key under `root`.
    #[must_use]
    pub fn path(&self, root: &StorePath) -> StorePath {
        root.join(&self.parent_id).join(&self.id)
    }
}

impl std::fmt::Display for DeviceInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\\{}", self.parent_id, self.id)
    }
}
