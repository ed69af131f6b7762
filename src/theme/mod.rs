//! Theme system for human-mode output.

use console::Style;

use crate::wheel::WheelState;

/// Visual theme for human-mode output.
///
/// Centralizes colors and styles for consistent rendering.
pub struct FwTheme {
    // Brand colors
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,

    // Component styles
    pub header: Style,
    pub label: Style,
    pub value: Style,
    pub index: Style,
    pub device_id: Style,
    pub wheel_flipped: Style,
    pub wheel_normal: Style,
    pub wheel_unknown: Style,
}

impl Default for FwTheme {
    fn default() -> Self {
        Self {
            accent: Style::new().cyan(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warning: Style::new().yellow().bold(),
            muted: Style::new().dim(),
            header: Style::new().bold().underlined(),
            label: Style::new().dim(),
            value: Style::new().bold(),
            index: Style::new().yellow().bold(),
            device_id: Style::new().italic().dim(),
            wheel_flipped: Style::new().green(),
            wheel_normal: Style::new(),
            wheel_unknown: Style::new().dim(),
        }
    }
}

impl FwTheme {
    /// Style for a wheel-direction cell.
    #[must_use]
    pub const fn wheel(&self, state: WheelState) -> &Style {
        match state {
            WheelState::Flipped => &self.wheel_flipped,
            WheelState::Normal => &self.wheel_normal,
            WheelState::Unknown => &self.wheel_unknown,
        }
    }
}
