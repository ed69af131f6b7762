//! Scroll-wheel orientation state and toggling.
//!
//! The orientation lives in the `FlipFlopWheel` DWORD under an instance's
//! `Device Parameters` key: `0` is normal, `1` is flipped. The state is
//! always re-read from the store.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use crate::device::DeviceInstance;
use crate::error::{FwError, Result};
use crate::store::{DEVICE_PARAMETERS, FLIP_FLOP_WHEEL, HierarchicalStore, StorePath};

/// Scroll orientation of a device instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelState {
    /// No orientation value is established, or the instance is not a mouse.
    Unknown,
    /// `FlipFlopWheel = 0`.
    Normal,
    /// `FlipFlopWheel = 1`.
    Flipped,
}

impl WheelState {
    /// Map a stored value. Only 0 and 1 are defined.
    #[must_use]
    pub const fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Flipped),
            _ => None,
        }
    }

    /// Stored value, `None` for [`WheelState::Unknown`].
    #[must_use]
    pub const fn value(self) -> Option<u32> {
        match self {
            Self::Unknown => None,
            Self::Normal => Some(0),
            Self::Flipped => Some(1),
        }
    }

    /// The opposite orientation. `Unknown` has no transition.
    #[must_use]
    pub fn toggled(self) -> Option<Self> {
        self.value().and_then(|v| Self::from_value(v ^ 1))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Normal => "Normal",
            Self::Flipped => "Flipped",
        }
    }
}

impl fmt::Display for WheelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a toggle or a planned toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: WheelState,
    pub to: WheelState,
}

/// Reads and flips wheel orientation for instances under a catalog root.
pub struct WheelController<'a> {
    store: &'a dyn HierarchicalStore,
    root: StorePath,
}

impl<'a> WheelController<'a> {
    pub fn new(store: &'a dyn HierarchicalStore, root: StorePath) -> Self {
        Self { store, root }
    }

    /// Path of the instance's `Device Parameters` key.
    #[must_use]
    pub fn parameters_path(&self, instance: &DeviceInstance) -> StorePath {
        instance.path(&self.root).join(DEVICE_PARAMETERS)
    }

    /// Current orientation of `instance`.
    ///
    /// Non-mice, a missing `Device Parameters` key, a key with no values and
    /// a missing `FlipFlopWheel` value all resolve to
    /// [`WheelState::Unknown`].
    ///
    /// # Errors
    ///
    /// - [`FwError::WheelValueOutOfRange`] if the stored value is not 0 or 1.
    /// - An access error for any other store failure.
    #[instrument(skip(self, instance), fields(instance = %instance))]
    pub fn resolve(&self, instance: &DeviceInstance) -> Result<WheelState> {
        if !instance.is_mouse() {
            debug!(name = instance.friendly_name(), "Skip, not a mouse");
            return Ok(WheelState::Unknown);
        }

        let path = self.parameters_path(instance);
        let names = match self.store.list_value_names(&path) {
            Ok(names) => names,
            Err(FwError::KeyNotFound { .. }) => {
                trace!(path = %path, "No Device Parameters key");
                return Ok(WheelState::Unknown);
            }
            Err(err) => return Err(err),
        };

        if !names.iter().any(|n| n == FLIP_FLOP_WHEEL) {
            trace!(path = %path, values = names.len(), "No FlipFlopWheel value");
            return Ok(WheelState::Unknown);
        }

        let value = match self.store.read_integer(&path, FLIP_FLOP_WHEEL) {
            Ok(Some(value)) => value,
            Ok(None) | Err(FwError::KeyNotFound { .. }) => return Ok(WheelState::Unknown),
            Err(err) => return Err(err),
        };
        debug!(value, "FlipFlopWheel read");

        WheelState::from_value(value).ok_or_else(|| FwError::WheelValueOutOfRange {
            path: path.to_string(),
            value,
        })
    }

    /// Compute the toggle of `instance` without writing.
    ///
    /// # Errors
    ///
    /// Same as [`apply_toggle`](Self::apply_toggle), minus write failures.
    pub fn plan_toggle(&self, instance: &DeviceInstance) -> Result<Transition> {
        let from = self.resolve(instance)?;
        let to = from.toggled().ok_or_else(|| FwError::UnknownWheelState {
            device: instance.to_string(),
        })?;
        Ok(Transition { from, to })
    }

    /// Flip the orientation of `instance` and return the new state.
    ///
    /// # Errors
    ///
    /// Same as [`apply_toggle`](Self::apply_toggle).
    pub fn toggle(&self, instance: &DeviceInstance) -> Result<WheelState> {
        self.apply_toggle(instance).map(|transition| transition.to)
    }

    /// Flip the orientation of `instance`, persist it and report both states.
    ///
    /// Reads then writes with no locking in between; a concurrent change by
    /// another process is overwritten.
    ///
    /// # Errors
    ///
    /// - [`FwError::UnknownWheelState`] if there is no established value; nothing is written.
    /// - [`FwError::WheelValueOutOfRange`] if the stored value is not 0 or 1.
    /// - An access error if the value cannot be read or written.
    #[instrument(skip(self, instance), fields(instance = %instance))]
    pub fn apply_toggle(&self, instance: &DeviceInstance) -> Result<Transition> {
        let transition = self.plan_toggle(instance)?;
        let path = self.parameters_path(instance);
        // Both states of a planned transition carry a value.
        let value = transition.to.value().unwrap_or_default();

        self.store.write_integer(&path, FLIP_FLOP_WHEEL, value)?;
        info!(from = %transition.from, to = %transition.to, "Wheel direction changed");
        Ok(transition)
    }
}
