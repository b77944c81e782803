//! Search states.

use crate::domain::NodeId;

/// A position in time-expanded search: where the agent is, how many steps
/// have elapsed, and how many of them were spent waiting.
///
/// Field order defines the derived ordering: time first, then wait, with the
/// node id as a final tiebreak so that frontier order is fully deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchState {
    /// Elapsed time steps since the start.
    pub time: u64,

    /// Waiting steps used so far. Never exceeds `time`.
    pub wait: u64,

    /// Current node.
    pub node: NodeId,
}

impl SearchState {
    /// Create a state.
    pub fn new(node: NodeId, time: u64, wait: u64) -> Self {
        debug_assert!(wait <= time, "wait {wait} exceeds time {time}");
        Self { time, wait, node }
    }

    /// The initial state at `start`.
    pub fn origin(start: NodeId) -> Self {
        Self::new(start, 0, 0)
    }

    /// The state after waiting one step in place.
    pub fn waited(self) -> Self {
        Self::new(self.node, self.time + 1, self.wait + 1)
    }

    /// The state after moving to `to` in one step.
    pub fn moved_to(self, to: NodeId) -> Self {
        Self::new(to, self.time + 1, self.wait)
    }
}
