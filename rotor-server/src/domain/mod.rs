//! Domain types for the rotor search.
//!
//! These types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod node;

pub use node::{EdgeOrdinal, InvalidNodeId, NodeId};
