//! ASCII table formatting for run summaries
//!
//! Tables are rendered with the [`tabled`] crate and optionally prefixed with an
//! underlined title.

use tabled::{Table, Tabled};

/// Formats rows as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `rows` - Rows to format
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_table<T: Tabled>(rows: &[T], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No data available".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}

/// Formats a ratio of two values as a percentage with two decimals
pub fn format_percentage(part: f64, total: f64) -> String {
    if total == 0.0 {
        "0.00%".to_string()
    } else {
        format!("{:.2}%", (part / total) * 100.0)
    }
}
