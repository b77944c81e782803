//! Node and edge ordinal types.

use std::fmt;

/// Error returned when constructing a node id of zero.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id {value}: node ids start at 1")]
pub struct InvalidNodeId {
    value: usize,
}

/// A 1-based node identifier.
///
/// Node ids are always at least 1. Whether an id actually exists in a given
/// graph is checked by the graph itself, since that depends on its size.
///
/// # Examples
///
/// ```
/// use rotor_server::domain::NodeId;
///
/// let node = NodeId::new(3).unwrap();
/// assert_eq!(node.get(), 3);
/// assert_eq!(node.index(), 2);
///
/// // Zero is rejected
/// assert!(NodeId::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The conventional start node.
    pub const FIRST: NodeId = NodeId(1);

    /// Create a node id from its 1-based value.
    pub fn new(value: usize) -> Result<Self, InvalidNodeId> {
        if value == 0 {
            return Err(InvalidNodeId { value });
        }
        Ok(NodeId(value))
    }

    /// Create a node id from a 0-based array index.
    pub fn from_index(index: usize) -> Self {
        NodeId(index + 1)
    }

    /// Returns the 1-based value.
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns the 0-based array index.
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of an edge in a node's declaration-ordered incidence list.
///
/// Ordinals are 1-based and local to one endpoint: the same edge usually
/// has different ordinals at its two ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeOrdinal(usize);

impl EdgeOrdinal {
    /// Create an ordinal from its 1-based value. Returns `None` for zero.
    pub fn new(value: usize) -> Option<Self> {
        (value > 0).then_some(EdgeOrdinal(value))
    }

    /// Create an ordinal from a 0-based position.
    pub fn from_index(index: usize) -> Self {
        EdgeOrdinal(index + 1)
    }

    /// Returns the 1-based value.
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns the 0-based position.
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for EdgeOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Index and value conversions are inverse
        #[test]
        fn node_index_roundtrip(index in 0usize..1_000_000) {
            let node = NodeId::from_index(index);
            prop_assert_eq!(node.index(), index);
            prop_assert_eq!(NodeId::new(node.get()).unwrap(), node);
        }

        /// Ordering follows the numeric value
        #[test]
        fn node_order_matches_value(a in 1usize..10_000, b in 1usize..10_000) {
            let na = NodeId::new(a).unwrap();
            let nb = NodeId::new(b).unwrap();
            prop_assert_eq!(na.cmp(&nb), a.cmp(&b));
        }
    }
}
