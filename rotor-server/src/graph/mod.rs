//! Undirected graph with per-endpoint edge ordinals.
//!
//! Every edge gets a local ordinal at each of its endpoints, assigned in
//! declaration order. The rotation rule of the planner picks edges by these
//! ordinals, so the order in which edges are added is significant.

use crate::domain::{EdgeOrdinal, NodeId};

/// Error from graph construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint is not in `[1, node_count]`.
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },
}

/// An immutable-after-construction undirected graph.
///
/// Nodes are addressed by [`NodeId`] and stored index-addressed, so lookups
/// never hash. A self loop `(u, u)` occupies two consecutive ordinals at `u`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// `adjacency[u.index()]` lists the neighbors of `u` in ordinal order.
    adjacency: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `node_count` isolated nodes.
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Declare an undirected edge between `u` and `v`.
    ///
    /// The edge takes the next free ordinal at each endpoint.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        let a = self.node(u)?;
        let b = self.node(v)?;
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
        self.edge_count += 1;
        Ok(())
    }

    /// Validate a raw 1-based id against this graph.
    pub fn node(&self, raw: usize) -> Result<NodeId, GraphError> {
        NodeId::new(raw)
            .ok()
            .filter(|node| self.contains(*node))
            .ok_or(GraphError::NodeOutOfRange {
                node: raw,
                node_count: self.node_count(),
            })
    }

    /// Returns true if `node` exists in this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.adjacency.len()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of declared edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// The last node, which is the conventional search target.
    pub fn last_node(&self) -> Option<NodeId> {
        self.adjacency.len().checked_sub(1).map(NodeId::from_index)
    }

    /// Number of incident edge ends at `node` (zero for unknown nodes).
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// The largest degree in the graph.
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The neighbor reached through `ordinal` at `node`, if it exists.
    pub fn edge_at(&self, node: NodeId, ordinal: EdgeOrdinal) -> Option<NodeId> {
        self.neighbors(node).get(ordinal.index()).copied()
    }

    /// All neighbors of `node` in ordinal order.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over all node ids.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len()).map(NodeId::from_index)
    }
}

/// Builder for creating graphs.
///
/// Provides a fluent API for declaring edges; endpoints are validated when
/// the graph is built.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    node_count: usize,
    edges: Vec<(usize, usize)>,
}

impl GraphBuilder {
    /// Create a builder for a graph with `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
        }
    }

    /// Declare an edge.
    pub fn edge(mut self, u: usize, v: usize) -> Self {
        self.edges.push((u, v));
        self
    }

    /// Declare several edges in order.
    pub fn edges(mut self, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Build the graph, failing on the first out-of-range endpoint.
    pub fn build(self) -> Result<Graph, GraphError> {
        let mut graph = Graph::with_nodes(self.node_count);
        for (u, v) in self.edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }
}
