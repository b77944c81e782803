//! Successor generation.
//!
//! From any state the agent may wait in place, or take the one edge that the
//! rotation schedule makes available at the current time. At time `t` a node
//! of degree `d` offers the edge with ordinal `(t mod d) + 1`, cycling through
//! its incident edges in declaration order.

use crate::domain::EdgeOrdinal;
use crate::graph::Graph;

use super::dominance::DominanceStore;
use super::state::SearchState;

/// How a successor was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stayed in place for one step.
    Wait,
    /// Crossed the scheduled edge.
    Move { via: EdgeOrdinal },
}

/// A candidate successor, not yet admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub transition: Transition,
    pub state: SearchState,
}

/// The edge ordinal available at `time` on a node of the given degree.
///
/// Returns `None` for isolated nodes.
pub fn scheduled_ordinal(time: u64, degree: usize) -> Option<EdgeOrdinal> {
    let degree = u64::try_from(degree).ok().filter(|&d| d > 0)?;
    let position = usize::try_from(time % degree).ok()?;
    Some(EdgeOrdinal::from_index(position))
}

/// Generate the successors of a validated state.
///
/// The wait successor is left out when it would fall outside the window of
/// its node, since the store could never admit it.
pub fn successors(graph: &Graph, store: &DominanceStore, state: SearchState) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(2);

    let waited = state.waited();
    if store.in_window(state.node, waited.time) {
        candidates.push(Candidate {
            transition: Transition::Wait,
            state: waited,
        });
    }

    if let Some(via) = scheduled_ordinal(state.time, graph.degree(state.node)) {
        if let Some(to) = graph.edge_at(state.node, via) {
            candidates.push(Candidate {
                transition: Transition::Move { via },
                state: state.moved_to(to),
            });
        }
    }

    candidates
}
