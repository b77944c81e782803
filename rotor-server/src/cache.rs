//! Caching layer for solved instances.
//!
//! Searches are deterministic, so a result depends only on the graph (nodes
//! plus edges in declaration order) and the window. Repeated requests for
//! the same instance are answered from the cache.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::graph::{Graph, GraphError};
use crate::planner::{Planner, SearchConfig, SearchError, SearchResult};

/// Everything a search result depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemKey {
    pub node_count: usize,
    pub edges: Vec<(usize, usize)>,
    pub window: usize,
}

impl ProblemKey {
    /// Build the graph this key describes.
    pub fn graph(&self) -> Result<Graph, GraphError> {
        let mut graph = Graph::with_nodes(self.node_count);
        for &(u, v) in &self.edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
        }
    }
}

/// Error from a cached solve.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Search(#[from] SearchError),

    /// The blocking search task did not complete
    #[error("search task failed: {0}")]
    Task(String),
}

/// A search result and whether it came from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solved {
    pub result: SearchResult,
    pub cached: bool,
}

/// Planner with a result cache.
pub struct CachedPlanner {
    results: MokaCache<ProblemKey, SearchResult>,
}

impl CachedPlanner {
    /// Create a new cached planner.
    pub fn new(config: &CacheConfig) -> Self {
        let results = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { results }
    }

    /// Solve an instance, using the cache if available.
    ///
    /// The search itself runs on the blocking pool.
    pub async fn solve(&self, key: ProblemKey) -> Result<Solved, SolveError> {
        if let Some(result) = self.results.get(&key).await {
            debug!(nodes = key.node_count, edges = key.edges.len(), "cache hit");
            return Ok(Solved {
                result,
                cached: true,
            });
        }

        let graph = key.graph()?;
        let config = SearchConfig::new(key.window);
        let result = tokio::task::spawn_blocking(move || Planner::new(&graph, &config).solve())
            .await
            .map_err(|e| SolveError::Task(e.to_string()))??;

        self.results.insert(key, result).await;

        Ok(Solved {
            result,
            cached: false,
        })
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.results.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
    }
}
