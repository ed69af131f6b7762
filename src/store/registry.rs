//! Windows registry store.
//!
//! This module wraps the `winreg` crate to provide the live device tree
//! under `HKEY_LOCAL_MACHINE`.

use std::io;

use tracing::{debug, trace};
use winreg::RegKey;
use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ, KEY_SET_VALUE};

use super::{HierarchicalStore, StorePath};
use crate::error::{FwError, Result};

/// Registry-backed store rooted at a predefined hive.
pub struct RegistryStore {
    hive: RegKey,
}

impl RegistryStore {
    /// Store over `HKEY_LOCAL_MACHINE`.
    #[must_use]
    pub fn local_machine() -> Self {
        Self {
            hive: RegKey::predef(HKEY_LOCAL_MACHINE),
        }
    }

    fn open(&self, path: &StorePath, access: u32) -> Result<RegKey> {
        trace!(path = %path, access, "Opening registry key");
        self.hive
            .open_subkey_with_flags(path.to_string(), access)
            .map_err(|e| map_key_error(path, &e))
    }
}

fn map_key_error(path: &StorePath, err: &io::Error) -> FwError {
    if err.kind() == io::ErrorKind::NotFound {
        FwError::KeyNotFound {
            path: path.to_string(),
        }
    } else {
        FwError::access(path, err)
    }
}

fn map_value_error<T>(path: &StorePath, result: io::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FwError::access(path, e)),
    }
}

impl HierarchicalStore for RegistryStore {
    fn list_children(&self, path: &StorePath) -> Result<Vec<String>> {
        let key = self.open(path, KEY_READ)?;
        key.enum_keys()
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| FwError::access(path, e))
    }

    fn list_value_names(&self, path: &StorePath) -> Result<Vec<String>> {
        let key = self.open(path, KEY_READ)?;
        key.enum_values()
            .map(|entry| entry.map(|(name, _)| name))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| FwError::access(path, e))
    }

    fn read_string(&self, path: &StorePath, name: &str) -> Result<Option<String>> {
        let key = self.open(path, KEY_READ)?;
        map_value_error(path, key.get_value::<String, _>(name))
    }

    fn read_integer(&self, path: &StorePath, name: &str) -> Result<Option<u32>> {
        let key = self.open(path, KEY_READ)?;
        map_value_error(path, key.get_value::<u32, _>(name))
    }

    fn write_integer(&self, path: &StorePath, name: &str, value: u32) -> Result<()> {
        let key = self.open(path, KEY_SET_VALUE)?;
        key.set_value(name, &value)
            .map_err(|e| FwError::access(path, e))?;
        debug!(path = %path, name, value, "Registry value set");
        Ok(())
    }
}
