//! Application State
//!
//! Shared state accessible by all route handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::dashboard::{DashboardView, Heading};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The dashboard view every route reads from or refreshes
    pub view: Arc<DashboardView>,
    /// Title block of the HTML page
    pub heading: Arc<Heading>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(view: Arc<DashboardView>, heading: Heading, config: ServerConfig) -> Self {
        Self {
            view,
            heading: Arc::new(heading),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
