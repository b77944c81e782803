//! Best answer observed at the target.

use std::fmt;

/// Arrival time and waiting cost of a strategy reaching the target.
///
/// Ordered lexicographically: time first, then wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Answer {
    pub time: u64,
    pub wait: u64,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.wait)
    }
}

/// Final result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The target was reached.
    Reached(Answer),
    /// No strategy reaches the target.
    Unreachable,
}

impl Outcome {
    /// The answer, if the target was reached.
    pub fn answer(self) -> Option<Answer> {
        match self {
            Outcome::Reached(answer) => Some(answer),
            Outcome::Unreachable => None,
        }
    }

    /// Returns true if the target was reached.
    pub fn is_reached(self) -> bool {
        matches!(self, Outcome::Reached(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reached(answer) => answer.fmt(f),
            Outcome::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Holds the smallest answer seen so far.
#[derive(Debug, Clone, Default)]
pub struct ResultTracker {
    best: Option<Answer>,
}

impl ResultTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an arrival at the target. Returns true if it improved the answer.
    pub fn observe(&mut self, time: u64, wait: u64) -> bool {
        let candidate = Answer { time, wait };
        if self.best.is_some_and(|best| best <= candidate) {
            return false;
        }
        self.best = Some(candidate);
        true
    }

    /// Returns true if no state at `time` or later can improve the answer.
    pub fn settled_before(&self, time: u64) -> bool {
        self.best.is_some_and(|best| time > best.time)
    }

    /// The best answer so far.
    pub fn answer(&self) -> Option<Answer> {
        self.best
    }

    /// Convert into a final outcome.
    pub fn into_outcome(self) -> Outcome {
        self.best.map_or(Outcome::Unreachable, Outcome::Reached)
    }
}
