//! Settings file handling.
//!
//! An optional settings file (TOML or YAML) can set the catalog root and a
//! fixture store. Command-line flags take precedence over the file.
//!
//! # Example TOML
//!
//! ```toml
//! root = 'SYSTEM\CurrentControlSet\Enum\HID'
//! store = "~/fixtures/office-pc.yaml"
//! ```

mod path;

pub use path::{home_dir, resolve_path};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{FwError, Result};
use crate::store::fixture::DocumentFormat;
use crate::store::{DEFAULT_ROOT, StorePath, StoreSource};

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "flip_wheel";

/// Settings file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Catalog root in the store.
    #[serde(default)]
    pub root: Option<String>,

    /// Fixture file used instead of the system registry.
    ///
    /// Relative paths are resolved against the settings file's directory.
    #[serde(default)]
    pub store: Option<PathBuf>,
}

impl Settings {
    /// Default settings file location, e.g. `~/.config/flip_wheel/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`FwError::ConfigNotFound`] if the file does not exist and
    /// [`FwError::ConfigParse`] if it cannot be parsed.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FwError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let format = DocumentFormat::from_extension(path).ok_or_else(|| {
            FwError::ConfigParse(format!(
                "{}: expected a .toml, .yaml or .yml file",
                path.display()
            ))
        })?;

        let content = fs::read_to_string(path)?;
        let mut settings: Self = match format {
            DocumentFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        }
        .map_err(|e| FwError::ConfigParse(format!("{}: {e}", path.display())))?;

        if let Some(store) = settings.store.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            settings.store = Some(resolve_path(&store, base)?);
        }

        debug!(?settings, "Loaded settings");
        Ok(settings)
    }

    /// Load `explicit` if given, else the default file if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any file is invalid.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Effective configuration after command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub root: StorePath,
    pub source: StoreSource,
}

impl RuntimeConfig {
    /// Merge settings with command-line values; command-line values win.
    #[must_use]
    pub fn resolve(settings: &Settings, root: Option<&str>, store: Option<&Path>) -> Self {
        let root = root
            .or(settings.root.as_deref())
            .map_or_else(|| StorePath::parse(DEFAULT_ROOT), StorePath::parse);
        let source = store
            .map(Path::to_path_buf)
            .or_else(|| settings.store.clone())
            .map_or(StoreSource::System, StoreSource::Fixture);
        Self { root, source }
    }
}
