//! Plain-text renderer
//!
//! Draws a [`Page`] as aligned terminal tables.

use chrono::{DateTime, Local};

use crate::dashboard::page::{Cell, CellKind, Heading, Page, Report, Table, LOADING_MESSAGE};

/// Footer label of the refresh control
pub const REFRESH_HINT: &str = "[Enter] Refresh Data";

/// Render a page as plain text
pub fn render_text(page: &Page, heading: &Heading, rendered_at: DateTime<Local>) -> String {
    match page {
        Page::Loading => format!("{}\n", LOADING_MESSAGE),
        Page::Error(message) => format!("Error: {}\n", message),
        Page::Report(report) => render_report(report, heading, rendered_at),
    }
}

fn render_report(report: &Report, heading: &Heading, rendered_at: DateTime<Local>) -> String {
    let mut out = String::new();

    out.push_str(&heading.title);
    out.push('\n');
    out.push_str(&heading.subtitle);
    out.push_str("\n\n");

    for table in report.tables() {
        out.push_str(&render_table(table));
        out.push('\n');
    }

    out.push_str("Summary\n");
    let label_width = report
        .summary
        .iter()
        .map(|s| s.label.len())
        .max()
        .unwrap_or(0);
    for stat in &report.summary {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            stat.label,
            stat.value,
            width = label_width
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "{}    Last updated: {}\n",
        REFRESH_HINT,
        rendered_at.format("%-I:%M:%S %p")
    ));

    out
}

fn render_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.text.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(table.title);
    out.push('\n');

    let header: Vec<String> = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = *w))
        .collect();
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');

    let rule_len = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    if table.rows.is_empty() {
        out.push_str("(no rows)\n");
    }

    for row in &table.rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }

    if let Some(note) = table.note {
        out.push_str(note);
        out.push('\n');
    }

    out
}

fn pad(cell: &Cell, width: usize) -> String {
    match cell.kind {
        CellKind::Currency | CellKind::Count => format!("{:>width$}", cell.text, width = width),
        CellKind::Label | CellKind::Text => format!("{:<width$}", cell.text, width = width),
    }
}
