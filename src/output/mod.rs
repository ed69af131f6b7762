//! Output mode abstraction for robot and human output.

use serde::Serialize;
use tracing::warn;

use crate::cli::Cli;
use crate::device::{DeviceDescription, DeviceInstance};
use crate::error::FwError;
use crate::wheel::{Transition, WheelController, WheelState};

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

// === Result Types ===

/// One row of the mouse table.
#[derive(Debug, Clone, Serialize)]
pub struct MouseRow {
    pub index: usize,
    pub name: String,
    pub device_id: String,
    pub instance_id: String,
    pub wheel: WheelState,
    /// Why the wheel state could not be read, if it could not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MouseRow {
    /// Resolve the wheel state of each mouse for display.
    ///
    /// A failed read is shown as `Unknown` with the error attached instead of
    /// failing the whole listing.
    pub fn collect(controller: &WheelController<'_>, mice: &[DeviceInstance]) -> Vec<Self> {
        mice.iter()
            .enumerate()
            .map(|(index, mouse)| {
                let (wheel, error) = match controller.resolve(mouse) {
                    Ok(state) => (state, None),
                    Err(err) => {
                        warn!(instance = %mouse, error = %err, "Cannot read wheel direction");
                        (WheelState::Unknown, Some(err.to_string()))
                    }
                };
                Self {
                    index,
                    name: mouse.friendly_name().to_string(),
                    device_id: mouse.parent_id.clone(),
                    instance_id: mouse.id.clone(),
                    wheel,
                    error,
                }
            })
            .collect()
    }
}

/// One row of the full instance listing.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceRow {
    pub device_id: String,
    pub instance_id: String,
    pub is_mouse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<DeviceDescription>,
}

impl From<&DeviceInstance> for InstanceRow {
    fn from(instance: &DeviceInstance) -> Self {
        Self {
            device_id: instance.parent_id.clone(),
            instance_id: instance.id.clone(),
            is_mouse: instance.is_mouse(),
            description: instance.description.clone(),
        }
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReport {
    pub index: usize,
    pub name: String,
    pub device_id: String,
    pub instance_id: String,
    pub from: WheelState,
    pub to: WheelState,
    pub dry_run: bool,
}

impl ToggleReport {
    #[must_use]
    pub fn new(index: usize, mouse: &DeviceInstance, transition: Transition, dry_run: bool) -> Self {
        Self {
            index,
            name: mouse.friendly_name().to_string(),
            device_id: mouse.parent_id.clone(),
            instance_id: mouse.id.clone(),
            from: transition.from,
            to: transition.to,
            dry_run,
        }
    }
}

/// Build metadata for the `version` command.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub git_dirty: bool,
    pub build_timestamp: &'static str,
    pub rustc_version: &'static str,
    pub target: &'static str,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for scripts and agents.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human,
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub const fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            if cli.use_compact_json() {
                Self::Robot(RobotFormat::JsonCompact)
            } else {
                Self::Robot(RobotFormat::Json)
            }
        } else {
            Self::Human
        }
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human => Box::new(HumanOutput::new()),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &FwError);

    // Listings
    fn mouse_table(&self, rows: &[MouseRow]);
    fn instance_list(&self, rows: &[InstanceRow]);

    // Toggle
    fn prompt(&self, message: &str);
    fn toggle_result(&self, report: &ToggleReport);

    // Metadata
    fn version_info(&self, info: &VersionInfo);
}
