//! Error types for flip-wheel operations.

use thiserror::Error;

/// Primary error type for device catalog and wheel operations.
#[derive(Error, Debug)]
pub enum FwError {
    // Store access errors
    #[error("Registry key not found: {path}")]
    KeyNotFound { path: String },

    #[error("Cannot access '{path}': {reason}")]
    Access { path: String, reason: String },

    #[error("Device store is not available on this platform")]
    UnsupportedPlatform,

    // Descriptor errors
    #[error("Malformed device descriptor: {raw:?}")]
    MalformedDescriptor { raw: String },

    // Wheel state errors
    #[error("FlipFlopWheel value {value} at '{path}' is neither 0 nor 1")]
    WheelValueOutOfRange { path: String, value: u32 },

    #[error("Cannot toggle {device}: no scroll-orientation value is established")]
    UnknownWheelState { device: String },

    // Selection errors
    #[error("Invalid selection {input:?}: expected an index in 0..{count}")]
    InvalidSelection { input: String, count: usize },

    #[error("No mice found in the device registry")]
    NoMiceFound,

    // Fixture and configuration errors
    #[error("Fixture parse error in {path}: {reason}")]
    FixtureParse { path: String, reason: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FwError {
    /// Builds an access error for a store path.
    pub fn access(path: impl ToString, reason: impl ToString) -> Self {
        Self::Access {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the store could not be opened, read or written.
    ///
    /// A missing key counts as an access failure wherever the caller
    /// required it to be present.
    pub const fn is_access_error(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound { .. } | Self::Access { .. } | Self::UnsupportedPlatform
        )
    }

    /// Returns true for wheel values outside {0, 1} and toggles of an unknown state.
    pub const fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::WheelValueOutOfRange { .. } | Self::UnknownWheelState { .. }
        )
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Access { .. }
                | Self::UnsupportedPlatform
                | Self::UnknownWheelState { .. }
                | Self::InvalidSelection { .. }
                | Self::NoMiceFound
                | Self::ConfigNotFound { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Access { .. } => Some("Run the terminal as Administrator to change device settings"),
            Self::UnsupportedPlatform => Some("Use --store <FILE> to work on a captured registry fixture"),
            Self::UnknownWheelState { .. } => {
                Some("Set FlipFlopWheel once in Device Manager or regedit, then toggle again")
            }
            Self::InvalidSelection { .. } => Some("Run: fw list"),
            Self::NoMiceFound => Some("Ensure a HID mouse is connected"),
            Self::ConfigNotFound { .. } => Some("Check the --config path or FW_CONFIG"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using FwError.
pub type Result<T> = std::result::Result<T, FwError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| FwError::Other(format!("{}: {e}", f().into())))
    }
}
