//! Per-node dominance records.
//!
//! The store decides which states may enter the frontier. For every node it
//! remembers the earliest validated arrival time (the baseline) and, for each
//! offset inside the window, the smallest waiting cost seen at
//! `baseline + offset`. Arrivals further behind the baseline than the window
//! are never admitted, which keeps the otherwise unbounded time axis finite.

use crate::domain::NodeId;

use super::state::SearchState;

/// Outcome of submitting a candidate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Dominated, or too far behind the baseline.
    Rejected,

    /// Strictly earlier than any previous arrival at this node.
    NewBaseline,

    /// Same offset as a known arrival, but with less waiting.
    OffsetImprovement,
}

impl Admission {
    /// Returns true for either accepted outcome.
    pub fn is_accepted(self) -> bool {
        !matches!(self, Admission::Rejected)
    }
}

/// Dominance record for a single node.
#[derive(Debug, Clone)]
struct Record {
    best_time: u64,
    /// `best_wait[offset]`; `None` means no arrival at that offset yet.
    best_wait: Box<[Option<u64>]>,
}

/// Admission control table, indexed by node.
#[derive(Debug, Clone)]
pub struct DominanceStore {
    window: usize,
    records: Vec<Option<Record>>,
}

impl DominanceStore {
    /// Create an empty store for `node_count` nodes.
    ///
    /// `window` must be at least 1.
    pub fn new(node_count: usize, window: usize) -> Self {
        debug_assert!(window > 0, "window must be positive");
        Self {
            window,
            records: vec![None; node_count],
        }
    }

    /// The offset window this store was created with.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Submit a candidate arrival of `node` at `time` with `wait`.
    pub fn submit(&mut self, node: NodeId, time: u64, wait: u64) -> Admission {
        let window = self.window;
        let Some(slot) = self.records.get_mut(node.index()) else {
            return Admission::Rejected;
        };

        match slot {
            Some(record) if time >= record.best_time => {
                let Some(offset) = offset_within(time - record.best_time, window) else {
                    return Admission::Rejected;
                };
                let best = &mut record.best_wait[offset];
                if best.is_some_and(|w| wait >= w) {
                    return Admission::Rejected;
                }
                *best = Some(wait);
                Admission::OffsetImprovement
            }
            _ => {
                // Offsets are relative to the baseline, so older entries are
                // meaningless once it moves.
                let mut best_wait = vec![None; window].into_boxed_slice();
                best_wait[0] = Some(wait);
                *slot = Some(Record {
                    best_time: time,
                    best_wait,
                });
                Admission::NewBaseline
            }
        }
    }

    /// Returns true if a popped state is still the best known at its offset.
    ///
    /// A state is stale when its node has no record, when it has fallen
    /// outside the window, or when a cheaper arrival at the same offset was
    /// admitted after it was pushed.
    pub fn is_valid(&self, state: &SearchState) -> bool {
        let Some(record) = self.record(state.node) else {
            return false;
        };
        let Some(lag) = state.time.checked_sub(record.best_time) else {
            return false;
        };
        match offset_within(lag, self.window) {
            Some(offset) => record.best_wait[offset].is_none_or(|w| state.wait <= w),
            None => false,
        }
    }

    /// Returns true if an arrival at `node` at `time` could still be admitted.
    pub fn in_window(&self, node: NodeId, time: u64) -> bool {
        match self.record(node) {
            Some(record) => {
                time < record.best_time
                    || offset_within(time - record.best_time, self.window).is_some()
            }
            None => true,
        }
    }

    /// The baseline arrival time of `node`, if it has been reached.
    pub fn best_time(&self, node: NodeId) -> Option<u64> {
        self.record(node).map(|r| r.best_time)
    }

    /// The best waiting cost recorded at `best_time(node) + offset`.
    pub fn best_wait(&self, node: NodeId, offset: usize) -> Option<u64> {
        self.record(node)
            .and_then(|r| r.best_wait.get(offset).copied().flatten())
    }

    /// Number of nodes that have a record.
    pub fn records_len(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }

    fn record(&self, node: NodeId) -> Option<&Record> {
        self.records.get(node.index()).and_then(Option::as_ref)
    }
}

/// Converts a lag behind the baseline to a table offset, if it fits.
fn offset_within(lag: u64, window: usize) -> Option<usize> {
    usize::try_from(lag).ok().filter(|&offset| offset < window)
}
