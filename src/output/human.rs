//! Human-friendly output implementation using console styling.

use std::io::{self, Write};

use console::{Alignment, measure_text_width, pad_str};
use tracing::{debug, instrument};

use crate::error::FwError;
use crate::theme::FwTheme;

use super::{InstanceRow, MouseRow, Output, ToggleReport, VersionInfo};

const MOUSE_HEADERS: [&str; 5] = [
    "Index",
    "Friendly name",
    "Device ID",
    "Device Instance Id",
    "Wheel direction",
];

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    theme: FwTheme,
}

impl Default for HumanOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanOutput {
    #[must_use]
    pub fn new() -> Self {
        debug!("Creating HumanOutput");
        Self {
            theme: FwTheme::default(),
        }
    }

    /// Render the mouse table as lines, without a trailing newline.
    #[must_use]
    pub fn render_mouse_table(&self, rows: &[MouseRow]) -> Vec<String> {
        let cells: Vec<[String; 5]> = rows
            .iter()
            .map(|row| {
                [
                    row.index.to_string(),
                    row.name.clone(),
                    row.device_id.clone(),
                    row.instance_id.clone(),
                    row.wheel.to_string(),
                ]
            })
            .collect();

        let mut widths = MOUSE_HEADERS.map(measure_text_width);
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }

        let header = MOUSE_HEADERS
            .iter()
            .zip(widths)
            .map(|(title, width)| {
                self.theme
                    .header
                    .apply_to(pad_str(&title.to_uppercase(), width, Alignment::Left, None))
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("  ");

        let mut lines = vec![header.trim_end().to_string()];
        for (row, cells) in rows.iter().zip(&cells) {
            let line = cells
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(col, (cell, width))| {
                    let padded = pad_str(cell, width, Alignment::Left, None);
                    match col {
                        0 => self.theme.index.apply_to(padded).to_string(),
                        2 | 3 => self.theme.device_id.apply_to(padded).to_string(),
                        4 => self.theme.wheel(row.wheel).apply_to(padded).to_string(),
                        _ => padded.into_owned(),
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

impl Output for HumanOutput {
    #[instrument(skip(self))]
    fn success(&self, message: &str) {
        println!("{} {message}", self.theme.success.apply_to("[OK]"));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &FwError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!("{}: {error}", self.theme.error.apply_to("Error"));
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {suggestion}", self.theme.warning.apply_to("Hint"));
        }
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    fn mouse_table(&self, rows: &[MouseRow]) {
        if rows.is_empty() {
            println!("{}", self.theme.warning.apply_to("No mice found"));
            return;
        }
        println!("Configurable devices:");
        for line in self.render_mouse_table(rows) {
            println!("{line}");
        }
        for row in rows.iter().filter(|r| r.error.is_some()) {
            eprintln!(
                "{} {}: {}",
                self.theme.warning.apply_to("[WARN]"),
                row.index,
                row.error.as_deref().unwrap_or_default()
            );
        }
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    fn instance_list(&self, rows: &[InstanceRow]) {
        for row in rows {
            let marker = if row.is_mouse {
                self.theme.success.apply_to("mouse").to_string()
            } else {
                self.theme.muted.apply_to("-").to_string()
            };
            let desc = row.description.as_ref().map_or_else(
                || self.theme.muted.apply_to("(no descriptor)").to_string(),
                |d| format!("{} [{}]", d.name, self.theme.label.apply_to(&d.driver)),
            );
            println!(
                "{}\\{}  {marker}  {desc}",
                self.theme.device_id.apply_to(&row.device_id),
                self.theme.device_id.apply_to(&row.instance_id),
            );
        }
    }

    fn prompt(&self, message: &str) {
        print!("{message}");
        let _ = io::stdout().flush();
    }

    #[instrument(skip(self, report), fields(index = report.index))]
    fn toggle_result(&self, report: &ToggleReport) {
        let from = self.theme.wheel(report.from).apply_to(report.from);
        let to = self.theme.wheel(report.to).apply_to(report.to);
        if report.dry_run {
            println!(
                "DRY RUN: would change {} ({}\\{}) from {from} to {to}",
                self.theme.value.apply_to(&report.name),
                report.device_id,
                report.instance_id
            );
        } else {
            self.success(&format!(
                "{} wheel direction: {from} -> {to}",
                self.theme.value.apply_to(&report.name)
            ));
            println!(
                "{}",
                self.theme
                    .muted
                    .apply_to("Reconnect the mouse or restart for the change to apply")
            );
        }
    }

    fn version_info(&self, info: &VersionInfo) {
        println!("{} {}", self.theme.accent.apply_to("fw"), info.version);
        println!(
            "git: {}{}",
            info.git_sha,
            if info.git_dirty { " (dirty)" } else { "" }
        );
        println!("built: {}", info.build_timestamp);
        println!("rustc: {}", info.rustc_version);
        println!("target: {}", info.target);
    }
}
