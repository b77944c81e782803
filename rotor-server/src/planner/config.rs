//! Search configuration for the planner.

use super::search::SearchError;

/// Default offset window, in time steps.
pub const DEFAULT_WINDOW: usize = 600;

/// Largest accepted offset window. Each reached node allocates a table of
/// this many slots.
pub const MAX_WINDOW: usize = 1 << 16;

/// Configuration parameters for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// How many time steps an arrival may lag behind the best known arrival
    /// at its node before it is discarded as dominated.
    ///
    /// Arrival times stay exact as long as this is at least the graph's
    /// maximum degree. Waiting costs may be overestimated when an optimal
    /// strategy waits at one node for `window` steps or more.
    pub window: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given window.
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Check that the window is within `1..=MAX_WINDOW`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.window == 0 {
            return Err(SearchError::InvalidRequest(
                "window must be at least 1".to_string(),
            ));
        }
        if self.window > MAX_WINDOW {
            return Err(SearchError::InvalidRequest(format!(
                "window {} exceeds the maximum of {MAX_WINDOW}",
                self.window
            )));
        }
        Ok(())
    }

    /// Returns true if the window can preserve exact arrival times on a
    /// graph whose largest degree is `max_degree`.
    pub fn covers_degree(&self, max_degree: usize) -> bool {
        self.window >= max_degree
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}
