//! Output formatting for command results
//!
//! This module provides:
//! - Table rendering with a maximum column width
//! - Human-readable text output for `list` and `update`

mod table;

pub use table::{truncate, Table};

use crate::cli::DEFAULT_MAX_COLUMN_WIDTH;
use crate::domain::OutdatedDependency;
use crate::orchestrator::{CommandKind, OrchestratorResult};
use colored::Colorize;
use std::io::Write;

/// Message printed when nothing is outdated
pub const UP_TO_DATE_MESSAGE: &str = "All charts up to date.";

/// Title of the `list` table
pub const LIST_TITLE: &str = "The following dependencies are outdated:";

/// Title of the `update` table
pub const UPDATE_TITLE: &str = "Updating the following dependencies to their latest version:";

/// Table header row
pub const TABLE_HEADER: [&str; 4] = ["NAME", "VERSION", "LATEST_VERSION", "REPOSITORY"];

/// Configuration for output formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum width of a table cell
    pub max_column_width: usize,
    /// Whether to use colors
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            color: true,
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    config: OutputConfig,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write a command result
    pub fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if !result.resolution.has_requirements {
            writeln!(writer, "Chart {} has no requirements.", result.chart_path.display())?;
            return Ok(());
        }

        let title = match result.kind {
            CommandKind::List => LIST_TITLE,
            CommandKind::Update => UPDATE_TITLE,
        };
        write!(writer, "{}", self.format_outdated(title, &result.resolution.outdated))?;

        if let Some(bump) = &result.version_bump {
            writeln!(
                writer,
                "{}Incremented chart version from {} to {}.",
                self.dry_run_prefix(result.dry_run),
                bump.previous,
                self.paint_version(&bump.current)
            )?;
        }

        if let Some(write) = &result.write {
            let files: Vec<String> = [
                (write.requirements_modified, &write.requirements_path),
                (write.lock_modified, &write.lock_path),
            ]
            .iter()
            .filter(|(modified, _)| *modified)
            .filter_map(|(_, path)| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

            if !files.is_empty() {
                let verb = if result.dry_run { "Would update" } else { "Updated" };
                writeln!(
                    writer,
                    "{}{} {}.",
                    self.dry_run_prefix(result.dry_run),
                    verb,
                    files.join(" and ")
                )?;
            }
        }

        Ok(())
    }

    /// Render findings as a titled table, or the up-to-date message
    pub fn format_outdated(&self, title: &str, results: &[OutdatedDependency]) -> String {
        if results.is_empty() {
            return format!("{}\n", UP_TO_DATE_MESSAGE);
        }

        let mut table = Table::new(self.config.max_column_width).header(TABLE_HEADER);
        for r in results {
            table.add_row([
                r.name().to_string(),
                r.version().to_string(),
                r.latest_version.to_string(),
                r.repository().to_string(),
            ]);
        }

        format!("{}\n{}", title, table.render(self.config.color))
    }

    fn dry_run_prefix(&self, dry_run: bool) -> String {
        if !dry_run {
            return String::new();
        }
        if self.config.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    fn paint_version(&self, version: &str) -> String {
        if self.config.color {
            version.green().to_string()
        } else {
            version.to_string()
        }
    }
}
