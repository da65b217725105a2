//! Markdown helpers: pipe tables via `tabled`, cell escaping.

use tabled::{Table, Tabled, settings::Style};

/// Render rows as a GitHub-flavored Markdown table.
pub fn table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::markdown()).to_string()
}

/// Escape a cell value so it cannot break the table.
pub fn escape_cell(raw: &str) -> String {
    raw.replace('|', "\\|").replace(['\r', '\n'], " ")
}
