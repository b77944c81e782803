//! Best-first search over time-expanded states.
//!
//! Finds the earliest arrival at the target and, among earliest arrivals, the
//! one with the least waiting. States are explored in `(time, wait)` order,
//! admitted through the dominance store, and re-validated when popped.

use tracing::{debug, trace, warn};

use crate::domain::NodeId;
use crate::graph::Graph;

use super::config::SearchConfig;
use super::dominance::DominanceStore;
use super::frontier::Frontier;
use super::result::{Outcome, ResultTracker};
use super::state::SearchState;
use super::transition::successors;

/// Error from search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start or target is not a node of the graph
    #[error("node {node} is not in the graph ({node_count} nodes)")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// Request for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    /// Where the agent starts at time zero.
    pub start: NodeId,

    /// The node to reach.
    pub target: NodeId,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(start: NodeId, target: NodeId) -> Self {
        Self { start, target }
    }

    /// The conventional request: from node 1 to the last node.
    pub fn conventional(graph: &Graph) -> Result<Self, SearchError> {
        let target = graph
            .last_node()
            .ok_or_else(|| SearchError::InvalidRequest("graph has no nodes".to_string()))?;
        Ok(Self::new(NodeId::FIRST, target))
    }

    /// Validate the request against a graph.
    pub fn validate(&self, graph: &Graph) -> Result<(), SearchError> {
        for node in [self.start, self.target] {
            if !graph.contains(node) {
                return Err(SearchError::NodeOutOfRange {
                    node,
                    node_count: graph.node_count(),
                });
            }
        }
        Ok(())
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every admitted state was processed.
    FrontierExhausted,
    /// A state later than the best answer was popped.
    AnswerSettled,
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// States taken off the frontier.
    pub popped: usize,

    /// Popped states discarded as stale.
    pub stale: usize,

    /// States pushed onto the frontier.
    pub pushed: usize,

    /// How the search ended.
    pub termination: Termination,
}

impl SearchStats {
    /// Popped states that were valid and processed.
    pub fn explored(&self) -> usize {
        self.popped - self.stale
    }
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub outcome: Outcome,
    pub stats: SearchStats,
}

/// What a single driver step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The popped state had been superseded and was dropped.
    Stale(SearchState),
    /// The popped state was valid; `admitted` successors were pushed.
    Expanded { state: SearchState, admitted: usize },
    /// The search is over.
    Done(Termination),
}

/// The search loop as an explicit state machine.
///
/// Construction performs initialisation (the start state is admitted and
/// queued). Each [`step`](Self::step) processes one frontier entry until the
/// search is done; [`finish`](Self::finish) reads out the result.
pub struct SearchDriver<'a> {
    graph: &'a Graph,
    target: NodeId,
    store: DominanceStore,
    frontier: Frontier,
    tracker: ResultTracker,
    popped: usize,
    stale: usize,
    done: Option<Termination>,
}

impl<'a> SearchDriver<'a> {
    /// Initialise a search.
    pub fn new(
        graph: &'a Graph,
        config: &SearchConfig,
        request: &SearchRequest,
    ) -> Result<Self, SearchError> {
        request.validate(graph)?;
        config.validate()?;

        let max_degree = graph.max_degree();
        if !config.covers_degree(max_degree) {
            warn!(
                window = config.window,
                max_degree, "window is smaller than the largest degree; arrival times may be late"
            );
        }

        let mut store = DominanceStore::new(graph.node_count(), config.window);
        let mut frontier = Frontier::new();
        let origin = SearchState::origin(request.start);
        store.submit(origin.node, origin.time, origin.wait);
        frontier.push(origin);

        Ok(Self {
            graph,
            target: request.target,
            store,
            frontier,
            tracker: ResultTracker::new(),
            popped: 0,
            stale: 0,
            done: None,
        })
    }

    /// Process one frontier entry.
    pub fn step(&mut self) -> Step {
        if let Some(termination) = self.done {
            return Step::Done(termination);
        }

        let Some(state) = self.frontier.pop_min() else {
            return self.stop(Termination::FrontierExhausted);
        };
        self.popped += 1;

        if !self.store.is_valid(&state) {
            self.stale += 1;
            trace!(node = %state.node, time = state.time, wait = state.wait, "stale state");
            return Step::Stale(state);
        }

        if state.node == self.target && self.tracker.observe(state.time, state.wait) {
            debug!(time = state.time, wait = state.wait, "target reached");
        }

        if self.tracker.settled_before(state.time) {
            return self.stop(Termination::AnswerSettled);
        }

        let mut admitted = 0;
        for candidate in successors(self.graph, &self.store, state) {
            let next = candidate.state;
            if self.store.submit(next.node, next.time, next.wait).is_accepted() {
                trace!(
                    from = %state.node,
                    to = %next.node,
                    time = next.time,
                    wait = next.wait,
                    transition = ?candidate.transition,
                    "admitted"
                );
                self.frontier.push(next);
                admitted += 1;
            }
        }

        Step::Expanded { state, admitted }
    }

    /// Run until done and return the result.
    pub fn run(mut self) -> SearchResult {
        while !matches!(self.step(), Step::Done(_)) {}
        self.finish()
    }

    /// Read out the result.
    ///
    /// If the search has not finished, the termination reason reported is
    /// the one it would have on an exhausted frontier.
    pub fn finish(self) -> SearchResult {
        let stats = self.stats();
        let outcome = self.tracker.into_outcome();

        debug!(
            %outcome,
            popped = stats.popped,
            stale = stats.stale,
            pushed = stats.pushed,
            termination = ?stats.termination,
            "search complete"
        );

        SearchResult { outcome, stats }
    }

    /// Counters so far.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            popped: self.popped,
            stale: self.stale,
            pushed: self.frontier.pushed(),
            termination: self.done.unwrap_or(Termination::FrontierExhausted),
        }
    }

    /// The dominance table, for inspection between steps.
    pub fn store(&self) -> &DominanceStore {
        &self.store
    }

    /// Returns true once the search has stopped.
    pub fn is_done(&self) -> bool {
        self.done.is_some()
    }

    fn stop(&mut self, termination: Termination) -> Step {
        self.done = Some(termination);
        Step::Done(termination)
    }
}

/// Planner over a fixed graph and configuration.
pub struct Planner<'a> {
    graph: &'a Graph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a Graph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Search from `request.start` to `request.target`.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        Ok(SearchDriver::new(self.graph, self.config, request)?.run())
    }

    /// Search from node 1 to the last node.
    pub fn solve(&self) -> Result<SearchResult, SearchError> {
        self.search(&SearchRequest::conventional(self.graph)?)
    }
}
