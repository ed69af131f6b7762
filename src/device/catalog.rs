//! Store traversal for devices and their instances.

use tracing::{debug, instrument, trace, warn};

use super::descriptor;
use super::{Device, DeviceInstance};
use crate::error::Result;
use crate::store::{DEVICE_DESC, HierarchicalStore, StorePath};

/// Enumerates devices and instances below a catalog root.
pub struct DeviceCatalog<'a> {
    store: &'a dyn HierarchicalStore,
    root: StorePath,
}

impl<'a> DeviceCatalog<'a> {
    pub fn new(store: &'a dyn HierarchicalStore, root: StorePath) -> Self {
        Self { store, root }
    }

    /// List root devices in store order.
    ///
    /// # Errors
    ///
    /// Returns an access error if the root key cannot be listed.
    #[instrument(skip(self), fields(root = %self.root))]
    pub fn list_root_devices(&self) -> Result<Vec<Device>> {
        let names = self.store.list_children(&self.root)?;
        debug!(count = names.len(), "Got device names");
        Ok(names.into_iter().map(|id| Device { id }).collect())
    }

    /// List the instances of `device` in store order.
    ///
    /// An instance whose descriptor is absent, unreadable or malformed is
    /// kept with no description.
    ///
    /// # Errors
    ///
    /// Returns an access error if the device key cannot be listed.
    #[instrument(skip(self, device), fields(device = %device.id))]
    pub fn list_instances(&self, device: &Device) -> Result<Vec<DeviceInstance>> {
        let device_path = self.root.join(&device.id);
        let names = self.store.list_children(&device_path)?;

        let instances = names
            .into_iter()
            .map(|id| {
                let description = self.read_description(&device_path.join(&id));
                DeviceInstance {
                    id,
                    parent_id: device.id.clone(),
                    description,
                }
            })
            .collect();
        Ok(instances)
    }

    fn read_description(&self, path: &StorePath) -> Option<descriptor::DeviceDescription> {
        let raw = match self.store.read_string(path, DEVICE_DESC) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                trace!(path = %path, "No DeviceDesc value");
                return None;
            }
            Err(err) => {
                warn!(path = %path, error = %err, "Cannot read DeviceDesc");
                return None;
            }
        };

        match descriptor::parse(&raw) {
            Ok(desc) => {
                trace!(path = %path, driver = %desc.driver, "Parsed descriptor");
                Some(desc)
            }
            Err(err) => {
                debug!(path = %path, error = %err, "Skipping descriptor");
                None
            }
        }
    }

    /// List every instance of every root device, devices first then instances.
    ///
    /// # Errors
    ///
    /// Returns the first access error hit while listing devices or instances.
    pub fn load_all(&self) -> Result<Vec<DeviceInstance>> {
        let mut all = Vec::new();
        for device in self.list_root_devices()? {
            debug!(device = %device.id, "Processing device");
            all.extend(self.list_instances(&device)?);
        }
        Ok(all)
    }

    /// List mouse instances, preserving enumeration order.
    ///
    /// # Errors
    ///
    /// Returns the first access error hit while listing devices or instances.
    pub fn load_mice(&self) -> Result<Vec<DeviceInstance>> {
        let mice: Vec<_> = self
            .load_all()?
            .into_iter()
            .filter(DeviceInstance::is_mouse)
            .collect();
        debug!(count = mice.len(), "Loaded mice");
        Ok(mice)
    }
}
