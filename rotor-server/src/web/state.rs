//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedPlanner;
use crate::planner::SearchConfig;

use super::dto::RequestLimits;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Planner with result cache
    pub planner: Arc<CachedPlanner>,

    /// Search configuration; its window applies when a request gives none
    pub config: Arc<SearchConfig>,

    /// Size limits applied to every request
    pub limits: RequestLimits,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: CachedPlanner, config: SearchConfig) -> Self {
        Self {
            planner: Arc::new(planner),
            config: Arc::new(config),
            limits: RequestLimits::default(),
        }
    }

    /// Replace the request limits.
    pub fn with_limits(mut self, limits: RequestLimits) -> Self {
        self.limits = limits;
        self
    }
}
