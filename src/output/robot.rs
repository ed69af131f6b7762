//! Robot mode JSON output implementation.

use serde::Serialize;
use tracing::{debug, error, instrument, trace};

use crate::error::FwError;

use super::{InstanceRow, MouseRow, Output, RobotFormat, ToggleReport, VersionInfo};

/// JSON output implementation for scripts and agents.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    /// Serialize `data` in the configured format.
    fn render<T: Serialize + ?Sized>(&self, data: &T) -> Option<String> {
        let json = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        match json {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                Some(json)
            }
            Err(e) => {
                error!(error = %e, "JSON serialization failed");
                None
            }
        }
    }

    /// Output any serializable data as JSON to stdout.
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            println!("{json}");
        }
    }

    /// Output JSON to stderr.
    fn output_json_stderr<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            eprintln!("{json}");
        }
    }
}

impl Output for RobotOutput {
    #[instrument(skip(self))]
    fn success(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "success": true,
            "message": message
        }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &FwError) {
        debug!(error = %error, "Robot: error");
        self.output_json_stderr(&serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
            "access_error": error.is_access_error(),
            "invalid_state": error.is_invalid_state(),
        }));
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    fn mouse_table(&self, rows: &[MouseRow]) {
        self.output_json(rows);
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    fn instance_list(&self, rows: &[InstanceRow]) {
        self.output_json(rows);
    }

    fn prompt(&self, message: &str) {
        // Keep stdout parseable: prompts go to stderr.
        eprintln!("{message}");
    }

    #[instrument(skip(self, report), fields(index = report.index))]
    fn toggle_result(&self, report: &ToggleReport) {
        self.output_json(report);
    }

    fn version_info(&self, info: &VersionInfo) {
        self.output_json(info);
    }
}
