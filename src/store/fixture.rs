//! Fixture-file store.
//!
//! A fixture captures a subtree of the device registry as YAML or TOML, so the
//! tool can be exercised on any platform. Writes are persisted back to the
//! file.
//!
//! # Example YAML
//!
//! ```yaml
//! root: SYSTEM\CurrentControlSet\Enum\HID
//! keys:
//!   - name: VID_046D&PID_C077
//!     keys:
//!       - name: 7&2a1c6b55&0&0000
//!         values:
//!           DeviceDesc: "@mouhid.inf,%hid.mousedevice%;HID-compliant mouse"
//!         keys:
//!           - name: Device Parameters
//!             values:
//!               FlipFlopWheel: 0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use super::memory::{MemoryStore, StoreKey, StoreValue};
use super::{DEFAULT_ROOT, HierarchicalStore, StorePath};
use crate::error::{FwError, Result, ResultExt};

/// Document format of fixture and settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
}

impl DocumentFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting document format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// On-disk fixture document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDocument {
    /// Store path the keys are mounted under.
    #[serde(default = "default_root")]
    pub root: StorePath,
    /// Top-level keys, in enumeration order.
    #[serde(default)]
    pub keys: Vec<StoreKey>,
}

fn default_root() -> StorePath {
    StorePath::parse(DEFAULT_ROOT)
}

impl FixtureDocument {
    /// Parse a fixture from text.
    pub fn parse(content: &str, format: DocumentFormat) -> std::result::Result<Self, String> {
        match format {
            DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Render a fixture as text.
    pub fn render(&self, format: DocumentFormat) -> std::result::Result<String, String> {
        match format {
            DocumentFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
        }
    }
}

/// Store backed by a fixture file.
#[derive(Debug)]
pub struct FixtureStore {
    path: PathBuf,
    format: DocumentFormat,
    root: StorePath,
    inner: MemoryStore,
}

impl FixtureStore {
    /// Load a fixture file.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let format = DocumentFormat::from_extension(path).ok_or_else(|| FwError::FixtureParse {
            path: path.display().to_string(),
            reason: "unsupported extension (expected .yaml, .yml or .toml)".to_string(),
        })?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        let document =
            FixtureDocument::parse(&content, format).map_err(|reason| FwError::FixtureParse {
                path: path.display().to_string(),
                reason,
            })?;

        debug!(
            root = %document.root,
            keys = document.keys.len(),
            ?format,
            "Loaded fixture"
        );

        let inner = MemoryStore::new();
        inner.mount(&document.root, document.keys);

        Ok(Self {
            path: path.to_path_buf(),
            format,
            root: document.root,
            inner,
        })
    }

    /// The underlying in-memory tree.
    #[must_use]
    pub const fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    /// Write `tree` (the whole store) back to the fixture file.
    fn save(&self, tree: &StoreKey) -> Result<()> {
        let keys = tree
            .find(&self.root)
            .map(|key| key.keys.clone())
            .unwrap_or_default();
        let document = FixtureDocument {
            root: self.root.clone(),
            keys,
        };
        let file = self.path.display();
        let content = document
            .render(self.format)
            .map_err(|reason| FwError::access(&file, reason))?;
        fs::write(&self.path, content).map_err(|e| FwError::access(&file, e))?;
        info!(path = %file, "Fixture saved");
        Ok(())
    }
}

impl HierarchicalStore for FixtureStore {
    fn list_children(&self, path: &StorePath) -> Result<Vec<String>> {
        self.inner.list_children(path)
    }

    fn list_value_names(&self, path: &StorePath) -> Result<Vec<String>> {
        self.inner.list_value_names(path)
    }

    fn read_string(&self, path: &StorePath, name: &str) -> Result<Option<String>> {
        self.inner.read_string(path, name)
    }

    fn read_integer(&self, path: &StorePath, name: &str) -> Result<Option<u32>> {
        self.inner.read_integer(path, name)
    }

    /// The file is written first; the in-memory tree only changes once
    /// the file holds the new value.
    fn write_integer(&self, path: &StorePath, name: &str, value: u32) -> Result<()> {
        let mut tree = self.inner.subtree(&StorePath::root()).unwrap_or_default();
        let key = tree.find_mut(path).ok_or_else(|| FwError::KeyNotFound {
            path: path.to_string(),
        })?;
        key.values.insert(name.to_string(), StoreValue::Integer(value));

        self.save(&tree)?;
        self.inner.write_integer(path, name, value)
    }
}
