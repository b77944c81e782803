//! Min-priority frontier of pending states.
//!
//! Entries are never removed early. A state that has been superseded since it
//! was pushed stays in the heap and is filtered out by the dominance store
//! when it is popped.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::state::SearchState;

/// Pending states ordered by `(time, wait)` ascending.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<SearchState>>,
    pushed: usize,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state.
    pub fn push(&mut self, state: SearchState) {
        self.heap.push(Reverse(state));
        self.pushed += 1;
    }

    /// Remove and return the state with the smallest `(time, wait)`.
    pub fn pop_min(&mut self) -> Option<SearchState> {
        self.heap.pop().map(|Reverse(state)| state)
    }

    /// Number of entries currently queued, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes over the frontier's lifetime.
    pub fn pushed(&self) -> usize {
        self.pushed
    }
}
