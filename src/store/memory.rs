//! In-memory store implementation.
//!
//! Backs fixture files and tests. Records every store call and supports
//! injecting failures, so traversal and toggle logic can be asserted
//! without a real registry.
//!
//! # Example
//!
//! ```rust,ignore
//! use fw::store::{MemoryStore, Operation, StorePath};
//!
//! let store = MemoryStore::new();
//! let params = StorePath::parse(r"HID\VID_1\7&1\Device Parameters");
//! store.set_value(&params, "FlipFlopWheel", 0u32);
//!
//! store.write_integer(&params, "FlipFlopWheel", 1).unwrap();
//! store.assert_contains(&Operation::WriteInteger {
//!     path: params.to_string(),
//!     name: "FlipFlopWheel".to_string(),
//!     value: 1,
//! });
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{HierarchicalStore, StorePath};
use crate::error::{FwError, Result};

/// A value held by a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
    /// DWORD value.
    Integer(u32),
    /// String value.
    String(String),
}

impl From<u32> for StoreValue {
    fn from(value: u32) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A named key with its values and ordered sub-keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreKey {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, StoreValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<StoreKey>,
}

impl StoreKey {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a value to this key.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<StoreValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Append a sub-key. Sub-keys keep insertion order.
    #[must_use]
    pub fn with_key(mut self, key: Self) -> Self {
        self.keys.push(key);
        self
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.keys.iter().find(|k| k.name == name)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.keys.iter_mut().find(|k| k.name == name)
    }

    fn child_or_insert(&mut self, name: &str) -> &mut Self {
        if let Some(pos) = self.keys.iter().position(|k| k.name == name) {
            &mut self.keys[pos]
        } else {
            self.keys.push(Self::new(name));
            let last = self.keys.len() - 1;
            &mut self.keys[last]
        }
    }

    pub(super) fn find(&self, path: &StorePath) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |key, segment| key.child(segment))
    }

    pub(super) fn find_mut(&mut self, path: &StorePath) -> Option<&mut Self> {
        path.segments()
            .iter()
            .try_fold(self, |key, segment| key.child_mut(segment))
    }

    fn find_or_insert(&mut self, path: &StorePath) -> &mut Self {
        path.segments()
            .iter()
            .fold(self, |key, segment| key.child_or_insert(segment))
    }
}

/// Recorded store call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListChildren { path: String },
    ListValueNames { path: String },
    ReadString { path: String, name: String },
    ReadInteger { path: String, name: String },
    WriteInteger { path: String, name: String, value: u32 },
}

impl Operation {
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::WriteInteger { .. })
    }
}

/// Ordered in-memory key tree.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tree: Mutex<StoreKey>,
    operation_log: Mutex<Vec<Operation>>,
    error_injection: Mutex<Option<FwError>>,
    failing_paths: Mutex<Vec<StorePath>>,
    read_only: AtomicBool,
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose top-level key is `root`.
    #[must_use]
    pub fn from_root(root: StoreKey) -> Self {
        Self {
            tree: Mutex::new(root),
            ..Self::default()
        }
    }

    // === Setup ===

    /// Create `path` and any missing parents.
    pub fn insert_key(&self, path: &StorePath) {
        trace!(path = %path, "Inserting key");
        guard(&self.tree).find_or_insert(path);
    }

    /// Set a value, creating the key if needed.
    pub fn set_value(&self, path: &StorePath, name: &str, value: impl Into<StoreValue>) {
        let value = value.into();
        trace!(path = %path, name, ?value, "Setting value");
        guard(&self.tree)
            .find_or_insert(path)
            .values
            .insert(name.to_string(), value);
    }

    /// Append sub-keys under `path`, creating it if needed.
    pub fn mount(&self, path: &StorePath, keys: Vec<StoreKey>) {
        debug!(path = %path, count = keys.len(), "Mounting keys");
        guard(&self.tree).find_or_insert(path).keys.extend(keys);
    }

    /// Clone the key at `path`.
    #[must_use]
    pub fn subtree(&self, path: &StorePath) -> Option<StoreKey> {
        guard(&self.tree).find(path).cloned()
    }

    // === Failure injection ===

    /// Inject an error for the next store call.
    pub fn inject_error(&self, error: FwError) {
        *guard(&self.error_injection) = Some(error);
    }

    /// Clear injected error.
    pub fn clear_error(&self) {
        *guard(&self.error_injection) = None;
    }

    /// Make every call on `path` fail with an access error.
    pub fn fail_path(&self, path: &StorePath) {
        guard(&self.failing_paths).push(path.clone());
    }

    /// Deny or allow writes.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    // === Assertions ===

    /// Get a value without recording an operation.
    #[must_use]
    pub fn value(&self, path: &StorePath, name: &str) -> Option<StoreValue> {
        guard(&self.tree)
            .find(path)
            .and_then(|key| key.values.get(name).cloned())
    }

    /// Get a DWORD value without recording an operation.
    #[must_use]
    pub fn integer(&self, path: &StorePath, name: &str) -> Option<u32> {
        match self.value(path, name) {
            Some(StoreValue::Integer(v)) => Some(v),
            _ => None,
        }
    }

    /// Get all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<Operation> {
        guard(&self.operation_log).clone()
    }

    /// Get the recorded writes.
    #[must_use]
    pub fn writes(&self) -> Vec<Operation> {
        self.operations()
            .into_iter()
            .filter(Operation::is_write)
            .collect()
    }

    /// Clear the operation log for fresh assertions.
    pub fn clear_operations(&self) {
        guard(&self.operation_log).clear();
    }

    /// Assert a specific operation was performed at least once.
    ///
    /// # Panics
    ///
    /// Panics if the operation was not found.
    pub fn assert_contains(&self, expected: &Operation) {
        let ops = self.operations();
        assert!(
            ops.contains(expected),
            "Expected operation {expected:?} not found in: {ops:#?}",
        );
    }

    /// Assert nothing was written.
    ///
    /// # Panics
    ///
    /// Panics if any write was recorded.
    pub fn assert_no_writes(&self) {
        let writes = self.writes();
        assert!(writes.is_empty(), "Expected no writes, but found: {writes:#?}");
    }

    // === Internal Helpers ===

    fn record_op(&self, op: Operation) {
        trace!(?op, "Recording operation");
        guard(&self.operation_log).push(op);
    }

    fn check_error(&self, path: &StorePath) -> Result<()> {
        if let Some(error) = guard(&self.error_injection).take() {
            return Err(error);
        }
        if guard(&self.failing_paths).contains(path) {
            return Err(FwError::access(path, "injected access failure"));
        }
        Ok(())
    }

    fn with_key<T>(&self, path: &StorePath, f: impl FnOnce(&StoreKey) -> Result<T>) -> Result<T> {
        self.check_error(path)?;
        let tree = guard(&self.tree);
        let key = tree.find(path).ok_or_else(|| FwError::KeyNotFound {
            path: path.to_string(),
        })?;
        f(key)
    }
}

impl HierarchicalStore for MemoryStore {
    fn list_children(&self, path: &StorePath) -> Result<Vec<String>> {
        self.record_op(Operation::ListChildren {
            path: path.to_string(),
        });
        self.with_key(path, |key| Ok(key.keys.iter().map(|k| k.name.clone()).collect()))
    }

    fn list_value_names(&self, path: &StorePath) -> Result<Vec<String>> {
        self.record_op(Operation::ListValueNames {
            path: path.to_string(),
        });
        self.with_key(path, |key| Ok(key.values.keys().cloned().collect()))
    }

    fn read_string(&self, path: &StorePath, name: &str) -> Result<Option<String>> {
        self.record_op(Operation::ReadString {
            path: path.to_string(),
            name: name.to_string(),
        });
        self.with_key(path, |key| match key.values.get(name) {
            None => Ok(None),
            Some(StoreValue::String(s)) => Ok(Some(s.clone())),
            Some(StoreValue::Integer(_)) => Err(FwError::access(
                path,
                format!("value '{name}' is not a string"),
            )),
        })
    }

    fn read_integer(&self, path: &StorePath, name: &str) -> Result<Option<u32>> {
        self.record_op(Operation::ReadInteger {
            path: path.to_string(),
            name: name.to_string(),
        });
        self.with_key(path, |key| match key.values.get(name) {
            None => Ok(None),
            Some(StoreValue::Integer(v)) => Ok(Some(*v)),
            Some(StoreValue::String(_)) => Err(FwError::access(
                path,
                format!("value '{name}' is not a DWORD"),
            )),
        })
    }

    fn write_integer(&self, path: &StorePath, name: &str, value: u32) -> Result<()> {
        self.record_op(Operation::WriteInteger {
            path: path.to_string(),
            name: name.to_string(),
            value,
        });
        self.check_error(path)?;
        if self.read_only.load(Ordering::SeqCst) {
            return Err(FwError::access(path, "write access denied"));
        }
        let mut tree = guard(&self.tree);
        let key = tree.find_mut(path).ok_or_else(|| FwError::KeyNotFound {
            path: path.to_string(),
        })?;
        key.values.insert(name.to_string(), StoreValue::Integer(value));
        debug!(path = %path, name, value, "Value written");
        Ok(())
    }
}
