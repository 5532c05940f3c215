//! Graph loading boundary.
//!
//! A `GraphLoader` produces a validated, shareable graph for a `GraphId`.
//! How a topology gets defined (builder calls, configuration, code) is the
//! caller's business; the engine only needs the resolved `Arc<Graph<S>>`.

use super::{Graph, GraphId};
use crate::error::Error;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves graph ids to shared graphs.
pub trait GraphLoader<S>: Send + Sync {
    /// Whether this loader can resolve the given id.
    fn supports(&self, id: &GraphId) -> bool;

    /// Resolve the graph. Fails with [`Error::UnknownGraph`] when the id is
    /// not supported.
    fn make(&self, id: &GraphId) -> Result<Arc<Graph<S>>, Error>;
}

/// Loader backed by a fixed set of pre-built graphs.
///
/// # Example
///
/// ```rust
/// use stateward::{GraphBuilder, GraphId, StaticGraphLoader, TransitionBuilder};
/// use stateward::GraphLoader;
///
/// let graph = GraphBuilder::<()>::new("orders")
///     .state("pending")
///     .state("active")
///     .transition(TransitionBuilder::new("activate").initial("pending").to("active"))
///     .build()
///     .unwrap();
///
/// let loader = StaticGraphLoader::new().with(graph);
/// assert!(loader.supports(&GraphId::new("orders")));
/// assert!(loader.make(&GraphId::new("orders")).is_ok());
/// ```
pub struct StaticGraphLoader<S> {
    graphs: HashMap<GraphId, Arc<Graph<S>>>,
}

impl<S> StaticGraphLoader<S> {
    /// Create an empty loader.
    pub fn new() -> Self {
        StaticGraphLoader {
            graphs: HashMap::new(),
        }
    }

    /// Register a graph under its own id.
    pub fn with(mut self, graph: Graph<S>) -> Self {
        self.graphs.insert(graph.id().clone(), Arc::new(graph));
        self
    }

    /// Register an already-shared graph under its own id.
    pub fn with_shared(mut self, graph: Arc<Graph<S>>) -> Self {
        self.graphs.insert(graph.id().clone(), graph);
        self
    }
}

impl<S> Default for StaticGraphLoader<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> GraphLoader<S> for StaticGraphLoader<S> {
    fn supports(&self, id: &GraphId) -> bool {
        self.graphs.contains_key(id)
    }

    fn make(&self, id: &GraphId) -> Result<Arc<Graph<S>>, Error> {
        let graph = self
            .graphs
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownGraph(id.clone()))?;
        debug!("resolved graph '{}'", id);
        Ok(graph)
    }
}

/// Loader delegating to an ordered list of loaders; the first one that
/// supports the id wins.
pub struct ChainGraphLoader<S> {
    loaders: Vec<Box<dyn GraphLoader<S>>>,
}

impl<S> ChainGraphLoader<S> {
    /// Create an empty chain.
    pub fn new() -> Self {
        ChainGraphLoader {
            loaders: Vec::new(),
        }
    }

    /// Append a loader to the chain.
    pub fn push(mut self, loader: impl GraphLoader<S> + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }
}

impl<S> Default for ChainGraphLoader<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> GraphLoader<S> for ChainGraphLoader<S> {
    fn supports(&self, id: &GraphId) -> bool {
        self.loaders.iter().any(|l| l.supports(id))
    }

    fn make(&self, id: &GraphId) -> Result<Arc<Graph<S>>, Error> {
        self.loaders
            .iter()
            .find(|l| l.supports(id))
            .ok_or_else(|| Error::UnknownGraph(id.clone()))?
            .make(id)
    }
}
