//! Earliest-arrival planner on graphs with rotating edges.
//!
//! Every node offers exactly one of its edges at each time step, cycling
//! through them in declaration order. The planner finds the minimum time to
//! reach a target and, among strategies achieving it, the minimum number of
//! steps spent waiting.
//!
//! The search runs best-first over `(node, time, wait)` states. A per-node
//! dominance table with a bounded offset window decides which states are
//! worth keeping, so the search terminates even though waiting could go on
//! forever.

mod config;
mod dominance;
mod frontier;
mod result;
mod search;
mod state;
mod transition;

#[cfg(test)]
mod search_tests;

pub use config::{DEFAULT_WINDOW, MAX_WINDOW, SearchConfig};
pub use dominance::{Admission, DominanceStore};
pub use frontier::Frontier;
pub use result::{Answer, Outcome, ResultTracker};
pub use search::{
    Planner, SearchDriver, SearchError, SearchRequest, SearchResult, SearchStats, Step,
    Termination,
};
pub use state::SearchState;
pub use transition::{Candidate, Transition, scheduled_ordinal, successors};
