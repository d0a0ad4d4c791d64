//! Page model
//!
//! A presentation-neutral description of what the dashboard shows for a
//! given state. The text and HTML renderers both draw a [`Page`], so the
//! loading/error/report rules live in exactly one place.

use crate::dashboard::format::{format_count, format_usd};
use crate::dashboard::summary::Summary;
use crate::dashboard::view::ViewState;
use crate::pipeline::{LastMonthRow, ProductRow, RegionRow};

/// Shown while a refresh cycle is running
pub const LOADING_MESSAGE: &str = "Loading pipeline data...";

/// Shown under the last-month table
pub const LIVE_NOTE: &str = "This data is queried live on every refresh";

/// Title block shown above the report
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub title: String,
    pub subtitle: String,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            title: "Sage RevOps Dashboard".to_string(),
            subtitle: "Pipeline Analytics & Insights".to_string(),
        }
    }
}

/// Visual emphasis of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Success,
    Warning,
}

/// How a cell's value should be aligned and styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Label,
    Text,
    Currency,
    Count,
}

/// One formatted table cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub kind: CellKind,
    pub tone: Tone,
}

impl Cell {
    fn label(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: CellKind::Label,
            tone: Tone::Normal,
        }
    }

    fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: CellKind::Text,
            tone: Tone::Normal,
        }
    }

    fn usd(value: f64) -> Self {
        Self {
            text: format_usd(value),
            kind: CellKind::Currency,
            tone: Tone::Normal,
        }
    }

    fn count(value: f64) -> Self {
        Self {
            text: format_count(value),
            kind: CellKind::Count,
            tone: Tone::Normal,
        }
    }

    fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

/// A titled table of formatted rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
    pub note: Option<&'static str>,
}

/// One figure of the summary panel
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

/// The three report tables and the summary panel, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub regions: Table,
    pub products: Table,
    pub last_month: Table,
    pub summary: Vec<Stat>,
}

impl Report {
    /// Tables in the order they are displayed
    pub fn tables(&self) -> [&Table; 3] {
        [&self.regions, &self.products, &self.last_month]
    }
}

/// What the dashboard shows
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// Only a loading indicator
    Loading,
    /// Only the error message
    Error(String),
    /// The full report
    Report(Report),
}

impl Page {
    /// Decide what to show for a state. Loading wins over error, error wins
    /// over data.
    pub fn build(state: &ViewState) -> Self {
        if state.loading {
            return Page::Loading;
        }
        if let Some(error) = &state.error {
            return Page::Error(error.clone());
        }

        Page::Report(Report {
            regions: region_table(&state.regions),
            products: product_table(&state.products),
            last_month: last_month_table(&state.last_month),
            summary: summary_stats(&Summary::from_regions(&state.regions)),
        })
    }
}

fn region_table(rows: &[RegionRow]) -> Table {
    Table {
        title: "Pipeline by Region",
        headers: vec![
            "Region",
            "Total Amount",
            "Deal Count",
            "Avg Deal Size",
            "Closed",
            "Open",
        ],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    Cell::label(&row.region),
                    Cell::usd(row.total_amount),
                    Cell::count(row.deal_count),
                    Cell::usd(row.avg_deal_size),
                    Cell::usd(row.closed_amount).tone(Tone::Success),
                    Cell::usd(row.open_amount).tone(Tone::Warning),
                ]
            })
            .collect(),
        note: None,
    }
}

fn product_table(rows: &[ProductRow]) -> Table {
    Table {
        title: "Pipeline by Product",
        headers: vec!["Product", "Total Amount", "Deal Count", "Avg Deal Size"],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    Cell::label(&row.product),
                    Cell::usd(row.total_amount),
                    Cell::count(row.deal_count),
                    Cell::usd(row.avg_deal_size),
                ]
            })
            .collect(),
        note: None,
    }
}

fn last_month_table(rows: &[LastMonthRow]) -> Table {
    Table {
        title: "Last Month Sales (LIVE)",
        headers: vec![
            "Product",
            "Region",
            "Total Amount",
            "Deal Count",
            "Closed Amount",
        ],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    Cell::label(&row.product),
                    Cell::text(&row.region),
                    Cell::usd(row.total_amount),
                    Cell::count(row.deal_count),
                    Cell::usd(row.closed_amount).tone(Tone::Success),
                ]
            })
            .collect(),
        note: Some(LIVE_NOTE),
    }
}

fn summary_stats(summary: &Summary) -> Vec<Stat> {
    vec![
        Stat {
            label: "Total Pipeline",
            value: format_usd(summary.total_pipeline),
            tone: Tone::Normal,
        },
        Stat {
            label: "Total Deals",
            value: format_count(summary.total_deals),
            tone: Tone::Normal,
        },
        Stat {
            label: "Closed Amount",
            value: format_usd(summary.closed_amount),
            tone: Tone::Success,
        },
        Stat {
            label: "Open Amount",
            value: format_usd(summary.open_amount),
            tone: Tone::Warning,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::view::tests::{product, sale, west};

    fn ready_state() -> ViewState {
        ViewState {
            regions: vec![west()],
            products: vec![product("Cloud"), product("Edge")],
            last_month: vec![sale("Cloud", "West"), sale("Edge", "East"), sale("Edge", "West")],
            loading: false,
            ..Default::default()
        }
    }

    fn report(page: Page) -> Report {
        match page {
            Page::Report(report) => report,
            other => panic!("expected report, got {other:?}"),
        }
    }

    #[test]
    fn test_loading_hides_everything() {
        let mut state = ready_state();
        state.loading = true;
        state.error = Some("stale".to_string());
        assert_eq!(Page::build(&state), Page::Loading);
    }

    #[test]
    fn test_error_hides_tables() {
        let mut state = ready_state();
        state.error = Some("Request to /pipeline/by-region timed out".to_string());
        assert_eq!(
            Page::build(&state),
            Page::Error("Request to /pipeline/by-region timed out".to_string())
        );
    }

    #[test]
    fn test_row_counts_match_datasets() {
        let report = report(Page::build(&ready_state()));
        assert_eq!(report.regions.rows.len(), 1);
        assert_eq!(report.products.rows.len(), 2);
        assert_eq!(report.last_month.rows.len(), 3);

        let titles: Vec<_> = report.tables().iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            vec!["Pipeline by Region", "Pipeline by Product", "Last Month Sales (LIVE)"]
        );
    }

    #[test]
    fn test_empty_datasets_render_empty_tables() {
        let state = ViewState {
            loading: false,
            ..Default::default()
        };
        let report = report(Page::build(&state));

        assert!(report.tables().iter().all(|t| t.rows.is_empty()));
        let values: Vec<_> = report.summary.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["$0", "0", "$0", "$0"]);
    }

    #[test]
    fn test_west_region_scenario() {
        let report = report(Page::build(&ready_state()));

        let cells: Vec<_> = report.regions.rows[0].iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            cells,
            vec!["West", "$100,000", "4", "$25,000", "$60,000", "$40,000"]
        );
        assert_eq!(report.regions.rows[0][4].tone, Tone::Success);
        assert_eq!(report.regions.rows[0][5].tone, Tone::Warning);

        let summary: Vec<_> = report
            .summary
            .iter()
            .map(|s| (s.label, s.value.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Total Pipeline", "$100,000"),
                ("Total Deals", "4"),
                ("Closed Amount", "$60,000"),
                ("Open Amount", "$40,000"),
            ]
        );
    }

    #[test]
    fn test_summary_ignores_other_datasets() {
        let mut state = ready_state();
        state.regions.clear();
        let report = report(Page::build(&state));
        assert_eq!(report.summary[0].value, "$0");
        assert_eq!(report.products.rows.len(), 2);
    }
}
