//! Batch input parsing.
//!
//! The batch format is whitespace-separated integers: a test count `T`, then
//! `T` instances, each `n m` followed by `m` edge pairs `u v`. Edge order is
//! kept, since it defines the per-node edge ordinals.

use std::fs;
use std::io::Read;
use std::num::ParseIntError;
use std::path::Path;
use std::str::SplitAsciiWhitespace;

use tracing::debug;

use crate::graph::{Graph, GraphError};

/// Error from reading or parsing batch input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Input ended before a required value
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    /// A token is not a non-negative integer
    #[error("invalid {expected} {token:?}: {source}")]
    InvalidNumber {
        expected: &'static str,
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// An instance declares an edge to a node that does not exist
    #[error("instance {instance}: {source}")]
    Graph {
        instance: usize,
        #[source]
        source: GraphError,
    },

    /// Extra tokens after the last instance
    #[error("unexpected trailing input {token:?}")]
    TrailingInput { token: String },

    /// Reading the input failed
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Whitespace tokenizer with typed accessors.
struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_ascii_whitespace(),
        }
    }

    fn next_usize(&mut self, expected: &'static str) -> Result<usize, InputError> {
        let token = self
            .inner
            .next()
            .ok_or(InputError::UnexpectedEof { expected })?;
        token.parse().map_err(|source| InputError::InvalidNumber {
            expected,
            token: token.to_string(),
            source,
        })
    }
}

/// Parse a whole batch.
pub fn parse_batch(text: &str) -> Result<Vec<Graph>, InputError> {
    let mut tokens = Tokens::new(text);
    let count = tokens.next_usize("test count")?;

    let mut graphs = Vec::with_capacity(count.min(1024));
    for instance in 1..=count {
        graphs.push(parse_instance(&mut tokens, instance)?);
    }

    if let Some(token) = tokens.inner.next() {
        return Err(InputError::TrailingInput {
            token: token.to_string(),
        });
    }

    debug!(instances = graphs.len(), "parsed batch");
    Ok(graphs)
}

/// Parse a single instance without a leading test count.
pub fn parse_single(text: &str) -> Result<Graph, InputError> {
    let mut tokens = Tokens::new(text);
    let graph = parse_instance(&mut tokens, 1)?;
    if let Some(token) = tokens.inner.next() {
        return Err(InputError::TrailingInput {
            token: token.to_string(),
        });
    }
    Ok(graph)
}

fn parse_instance(tokens: &mut Tokens<'_>, instance: usize) -> Result<Graph, InputError> {
    let node_count = tokens.next_usize("node count")?;
    let edge_count = tokens.next_usize("edge count")?;

    let mut graph = Graph::with_nodes(node_count);
    for _ in 0..edge_count {
        let u = tokens.next_usize("edge endpoint")?;
        let v = tokens.next_usize("edge endpoint")?;
        graph
            .add_edge(u, v)
            .map_err(|source| InputError::Graph { instance, source })?;
    }
    Ok(graph)
}

/// Read and parse a batch from any reader.
pub fn read_batch_from(mut reader: impl Read) -> Result<Vec<Graph>, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_batch(&text)
}

/// Read and parse a batch from a file.
pub fn read_batch(path: &Path) -> Result<Vec<Graph>, InputError> {
    let text = fs::read_to_string(path)?;
    parse_batch(&text)
}
