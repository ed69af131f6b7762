//! Hierarchical key/value store abstraction.
//!
//! The device catalog and the wheel controller only talk to the store through
//! [`HierarchicalStore`], so they run unchanged against the Windows registry,
//! a fixture file, or an in-memory tree in tests.

pub mod fixture;
pub mod memory;
#[cfg(windows)]
pub mod registry;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use fixture::FixtureStore;
pub use memory::{MemoryStore, Operation, StoreKey, StoreValue};

/// Separator between path segments.
pub const SEPARATOR: char = '\\';

/// Root of the HID device tree under `HKEY_LOCAL_MACHINE`.
pub const DEFAULT_ROOT: &str = r"SYSTEM\CurrentControlSet\Enum\HID";

/// Sub-key of a device instance holding driver parameters.
pub const DEVICE_PARAMETERS: &str = "Device Parameters";

/// String value holding the instance descriptor.
pub const DEVICE_DESC: &str = "DeviceDesc";

/// DWORD value holding the scroll orientation.
pub const FLIP_FLOP_WHEEL: &str = "FlipFlopWheel";

/// Path to a key in the store, as a sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    /// Parse a `\`-separated path. Empty segments are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split(SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// The path of the store's top-level key.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Return a new path with `segment` appended.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the last segment, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<String> for StorePath {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for StorePath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<StorePath> for String {
    fn from(value: StorePath) -> Self {
        value.to_string()
    }
}

/// Read/write capability over a path-addressed tree of keys and values.
///
/// # Error contract
///
/// - A key that does not exist yields [`FwError::KeyNotFound`](crate::error::FwError::KeyNotFound).
/// - A value that does not exist on an existing key yields `Ok(None)`.
/// - Every other failure yields [`FwError::Access`](crate::error::FwError::Access).
pub trait HierarchicalStore {
    /// Names of the immediate sub-keys of `path`, in store order.
    fn list_children(&self, path: &StorePath) -> Result<Vec<String>>;

    /// Names of the values held directly by `path`.
    fn list_value_names(&self, path: &StorePath) -> Result<Vec<String>>;

    /// Read a string value.
    fn read_string(&self, path: &StorePath, name: &str) -> Result<Option<String>>;

    /// Read a DWORD value.
    fn read_integer(&self, path: &StorePath, name: &str) -> Result<Option<u32>>;

    /// Set a DWORD value. Requires write access to `path`.
    fn write_integer(&self, path: &StorePath, name: &str, value: u32) -> Result<()>;
}

/// Type alias for boxed trait object.
pub type BoxedStore = Box<dyn HierarchicalStore>;

/// Where device data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    /// The live registry of this machine.
    System,
    /// A YAML or TOML fixture file.
    Fixture(PathBuf),
}

/// Open the store for a source.
///
/// # Errors
///
/// Returns [`FwError::UnsupportedPlatform`](crate::error::FwError::UnsupportedPlatform)
/// for the system store on non-Windows hosts, or a fixture error if the file
/// cannot be loaded.
pub fn open(source: &StoreSource) -> Result<BoxedStore> {
    match source {
        StoreSource::System => open_system(),
        StoreSource::Fixture(path) => Ok(Box::new(FixtureStore::load(path)?)),
    }
}

#[cfg(windows)]
fn open_system() -> Result<BoxedStore> {
    Ok(Box::new(registry::RegistryStore::local_machine()))
}

#[cfg(not(windows))]
fn open_system() -> Result<BoxedStore> {
    Err(crate::error::FwError::UnsupportedPlatform)
}
