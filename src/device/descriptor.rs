//! `DeviceDesc` descriptor parsing.

use serde::Serialize;

use crate::error::{FwError, Result};

/// Driver token of the HID mouse class driver.
pub const MOUSE_DRIVER: &str = "@mouhid.inf";

/// Parsed form of a `"<driver>,<type>;<name>"` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescription {
    /// Driver identity, e.g. `@mouhid.inf`.
    pub driver: String,
    /// Device type token, e.g. `%hid.mousedevice%`.
    pub device_type: String,
    /// Human-readable name.
    pub name: String,
}

impl DeviceDescription {
    /// Returns true if the driver token is exactly [`MOUSE_DRIVER`].
    #[must_use]
    pub fn is_mouse(&self) -> bool {
        self.driver == MOUSE_DRIVER
    }
}

/// Parse a raw descriptor.
///
/// The driver ends at the first `,`, the type runs up to the first `;` and
/// the rest is the name. The name is taken verbatim and may itself contain
/// separators. Empty type and name are accepted.
///
/// # Errors
///
/// Returns [`FwError::MalformedDescriptor`] if either separator is missing or
/// the first `;` comes before the first `,`.
pub fn parse(raw: &str) -> Result<DeviceDescription> {
    let malformed = || FwError::MalformedDescriptor {
        raw: raw.to_string(),
    };

    let comma = raw.find(',').ok_or_else(malformed)?;
    let semicolon = raw.find(';').ok_or_else(malformed)?;
    if semicolon < comma {
        return Err(malformed());
    }

    Ok(DeviceDescription {
        driver: raw[..comma].to_string(),
        device_type: raw[comma + 1..semicolon].to_string(),
        name: raw[semicolon + 1..].to_string(),
    })
}
