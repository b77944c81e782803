//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::cache::{ProblemKey, Solved};

/// Size limits on a solve request, checked before any graph is built.
///
/// Each node the search reaches holds a table of `window` slots, so the
/// product of nodes and window is bounded as well as each on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_nodes: usize,
    pub max_edges: usize,
    pub max_cells: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_nodes: 100_000,
            max_edges: 200_000,
            max_cells: 1 << 26,
        }
    }
}

/// A request that exceeds its [`RequestLimits`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitError {
    #[error("{nodes} nodes exceeds the limit of {max}")]
    TooManyNodes { nodes: usize, max: usize },

    #[error("{edges} edges exceeds the limit of {max}")]
    TooManyEdges { edges: usize, max: usize },

    #[error("{nodes} nodes with window {window} exceeds the limit of {max} table cells")]
    TooManyCells {
        nodes: usize,
        window: usize,
        max: usize,
    },
}

/// Request to solve one instance.
#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    /// Number of nodes; the search runs from node 1 to this node
    pub nodes: usize,

    /// Undirected edges in declaration order
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,

    /// Offset window (defaults to the server's configured window)
    pub window: Option<usize>,
}

impl SolveRequest {
    /// Cache key for this request, filling in the default window.
    pub fn into_key(
        self,
        default_window: usize,
        limits: &RequestLimits,
    ) -> Result<ProblemKey, LimitError> {
        let window = self.window.unwrap_or(default_window);

        if self.nodes > limits.max_nodes {
            return Err(LimitError::TooManyNodes {
                nodes: self.nodes,
                max: limits.max_nodes,
            });
        }
        if self.edges.len() > limits.max_edges {
            return Err(LimitError::TooManyEdges {
                edges: self.edges.len(),
                max: limits.max_edges,
            });
        }
        if self.nodes.saturating_mul(window) > limits.max_cells {
            return Err(LimitError::TooManyCells {
                nodes: self.nodes,
                window,
                max: limits.max_cells,
            });
        }

        Ok(ProblemKey {
            node_count: self.nodes,
            edges: self.edges,
            window,
        })
    }
}

/// Response for a solve.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SolveResponse {
    /// Whether the target can be reached at all
    pub reachable: bool,

    /// Earliest arrival time at the target
    pub time: Option<u64>,

    /// Least waiting among earliest arrivals
    pub wait: Option<u64>,

    /// Number of valid states processed
    pub states_explored: usize,

    /// Whether the result was served from cache
    pub cached: bool,
}

impl From<Solved> for SolveResponse {
    fn from(solved: Solved) -> Self {
        let answer = solved.result.outcome.answer();
        Self {
            reachable: solved.result.outcome.is_reached(),
            time: answer.map(|a| a.time),
            wait: answer.map(|a| a.wait),
            states_explored: solved.result.stats.explored(),
            cached: solved.cached,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
