//! Dashboard View
//!
//! The single state container behind every presentation of the dashboard.
//! All writes go through [`DashboardView::refresh`], which fetches the three
//! datasets and commits them together, or records one error and commits
//! nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tokio::task::JoinHandle;

use crate::pipeline::{LastMonthRow, PipelineSource, ProductRow, RegionRow};

/// Error recorded when a cycle's future is dropped before it finishes
pub const CANCELLED_MESSAGE: &str = "Refresh was cancelled before it finished";

/// Everything a renderer needs to draw the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub regions: Vec<RegionRow>,
    pub products: Vec<ProductRow>,
    pub last_month: Vec<LastMonthRow>,
    pub loading: bool,
    pub error: Option<String>,
    /// When the last successful cycle was committed
    pub last_refreshed: Option<DateTime<Utc>>,
    /// Number of successful cycles committed so far
    pub committed_cycles: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            products: Vec::new(),
            last_month: Vec::new(),
            loading: true,
            error: None,
            last_refreshed: None,
            committed_cycles: 0,
        }
    }
}

/// Result of one call to [`DashboardView::refresh`]
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// All three datasets were fetched and committed
    Committed(RefreshStats),
    /// The cycle failed; the message is now the view's error
    Failed(String),
    /// Another refresh was already in flight, nothing was done
    Skipped,
}

/// Row counts and timing of a committed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    pub regions: usize,
    pub products: usize,
    pub last_month: usize,
    pub duration_ms: u64,
}

/// Dashboard state plus the source it is refreshed from
///
/// The state lock is never held across an `.await`, so a synchronous lock
/// is enough and lets a cancelled cycle settle the state from `Drop`.
pub struct DashboardView {
    source: Arc<dyn PipelineSource>,
    state: RwLock<ViewState>,
    in_flight: AtomicBool,
}

impl DashboardView {
    /// Create a view in its initial loading state
    pub fn new(source: Arc<dyn PipelineSource>) -> Self {
        Self {
            source,
            state: RwLock::new(ViewState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ViewState {
        self.read_state().clone()
    }

    /// Whether a refresh cycle is currently running
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ViewState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ViewState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one fetch cycle.
    ///
    /// The three datasets are fetched concurrently; the first failure ends
    /// the cycle. Calls made while a cycle is running return
    /// [`RefreshOutcome::Skipped`].
    ///
    /// If the returned future is dropped mid-cycle, nothing is committed and
    /// the view records [`CANCELLED_MESSAGE`] as its error.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(mut cycle) = CycleGuard::begin(self) else {
            tracing::debug!("Refresh already in flight, ignoring trigger");
            return RefreshOutcome::Skipped;
        };

        let started = Instant::now();
        tracing::debug!(cycle_id = %cycle.id, "Starting refresh cycle");

        let result = tokio::try_join!(
            self.source.regions(),
            self.source.products(),
            self.source.last_month()
        );

        let duration_ms = started.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok((regions, products, last_month)) => {
                let stats = RefreshStats {
                    regions: regions.len(),
                    products: products.len(),
                    last_month: last_month.len(),
                    duration_ms,
                };

                {
                    let mut state = self.write_state();
                    state.regions = regions;
                    state.products = products;
                    state.last_month = last_month;
                    state.loading = false;
                    state.last_refreshed = Some(Utc::now());
                    state.committed_cycles += 1;
                }

                tracing::info!(
                    cycle_id = %cycle.id,
                    regions = stats.regions,
                    products = stats.products,
                    last_month = stats.last_month,
                    duration_ms,
                    "Dashboard refreshed"
                );

                RefreshOutcome::Committed(stats)
            }
            Err(e) => {
                let message = e.to_string();

                {
                    let mut state = self.write_state();
                    state.loading = false;
                    state.error = Some(message.clone());
                }

                tracing::error!(
                    cycle_id = %cycle.id,
                    endpoint = ?e.endpoint(),
                    error = %e,
                    duration_ms,
                    "Dashboard refresh failed"
                );

                RefreshOutcome::Failed(message)
            }
        };

        cycle.settle();
        outcome
    }

    /// Run a refresh on its own task so it completes even if the caller
    /// stops waiting.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<RefreshOutcome> {
        let view = Arc::clone(self);
        tokio::spawn(async move { view.refresh().await })
    }
}

/// Holds the in-flight flag for the duration of one refresh.
///
/// Dropped unsettled means the cycle's future was cancelled: the view
/// leaves loading and shows [`CANCELLED_MESSAGE`].
struct CycleGuard<'a> {
    view: &'a DashboardView,
    id: uuid::Uuid,
    settled: bool,
}

impl<'a> CycleGuard<'a> {
    fn begin(view: &'a DashboardView) -> Option<Self> {
        view.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;

        {
            let mut state = view.write_state();
            state.loading = true;
            state.error = None;
        }

        Some(Self {
            view,
            id: uuid::Uuid::new_v4(),
            settled: false,
        })
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            {
                let mut state = self.view.write_state();
                state.loading = false;
                state.error = Some(CANCELLED_MESSAGE.to_string());
            }
            tracing::warn!(cycle_id = %self.id, "Refresh cycle cancelled");
        }
        self.view.in_flight.store(false, Ordering::Release);
    }
}
