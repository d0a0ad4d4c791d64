//! Summary panel
//!
//! Totals derived from the region dataset on every render.

use serde::Serialize;

use crate::pipeline::RegionRow;

/// Pipeline totals across all regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_pipeline: f64,
    pub total_deals: f64,
    pub closed_amount: f64,
    pub open_amount: f64,
}

impl Summary {
    /// Sum the region rows. An empty slice yields all zeros.
    pub fn from_regions(rows: &[RegionRow]) -> Self {
        rows.iter().fold(Summary::default(), |acc, row| Summary {
            total_pipeline: acc.total_pipeline + row.total_amount,
            total_deals: acc.total_deals + row.deal_count,
            closed_amount: acc.closed_amount + row.closed_amount,
            open_amount: acc.open_amount + row.open_amount,
        })
    }
}
