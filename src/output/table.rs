//! Plain-text table rendering
//!
//! Columns are padded to their widest cell and separated by two spaces.
//! Cells wider than the column limit are truncated with "...".

use colored::Colorize;

const SEPARATOR: &str = "  ";
const ELLIPSIS: &str = "...";

/// Table with an optional maximum column width
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Maximum characters per cell (0 means unlimited)
    max_column_width: usize,
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table
    pub fn new(max_column_width: usize) -> Self {
        Self {
            max_column_width,
            ..Self::default()
        }
    }

    /// Set the header row
    pub fn header<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = Some(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Append a row
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Number of body rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no body rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table. The header is bold when `color` is set.
    pub fn render(&self, color: bool) -> String {
        let header = self.header.as_ref().map(|h| self.truncate_row(h));
        let rows: Vec<Vec<String>> = self.rows.iter().map(|r| self.truncate_row(r)).collect();

        let mut widths: Vec<usize> = Vec::new();
        for row in header.iter().chain(rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let mut out = String::new();
        if let Some(header) = header {
            let line = format_row(&header, &widths);
            if color {
                out.push_str(&line.bold().to_string());
            } else {
                out.push_str(&line);
            }
            out.push('\n');
        }
        for row in &rows {
            out.push_str(&format_row(row, &widths));
            out.push('\n');
        }
        out
    }

    fn truncate_row(&self, row: &[String]) -> Vec<String> {
        row.iter()
            .map(|cell| truncate(cell, self.max_column_width))
            .collect()
    }
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let last = row.len().saturating_sub(1);
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate() {
        line.push_str(cell);
        if i < last {
            let pad = widths[i].saturating_sub(cell.chars().count());
            line.push_str(&" ".repeat(pad));
            line.push_str(SEPARATOR);
        }
    }
    line
}

/// Shorten a cell to at most `max` characters, ending in "..."
pub fn truncate(cell: &str, max: usize) -> String {
    let len = cell.chars().count();
    if max == 0 || len <= max {
        return cell.to_string();
    }
    if max <= ELLIPSIS.len() {
        return cell.chars().take(max).collect();
    }
    let kept: String = cell.chars().take(max - ELLIPSIS.len()).collect();
    format!("{}{}", kept, ELLIPSIS)
}
