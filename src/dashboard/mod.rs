//! Dashboard
//!
//! The dashboard view and everything needed to draw it:
//!
//! - [`view`]: state container and the `refresh()` cycle
//! - [`summary`]: totals derived from the region dataset
//! - [`format`]: currency and count formatting
//! - [`page`]: presentation-neutral page model
//! - [`text`] / [`html`]: renderers for the terminal and the browser

pub mod format;
pub mod html;
pub mod page;
pub mod summary;
pub mod text;
pub mod view;

pub use format::{format_count, format_usd};
pub use html::render_html;
pub use page::{Heading, Page, Report, Table};
pub use summary::Summary;
pub use text::render_text;
pub use view::{DashboardView, RefreshOutcome, RefreshStats, ViewState};
