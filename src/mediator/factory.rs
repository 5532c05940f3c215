//! Mediator selection per graph.

use super::StateMediator;
use crate::error::Error;
use crate::graph::GraphId;
use std::collections::HashMap;
use std::sync::Arc;

/// Produces the mediator appropriate for a given graph.
pub trait MediatorFactory<S>: Send + Sync {
    /// Resolve the mediator for the graph. Fails with
    /// [`Error::UnknownGraph`] when no mediator is registered for it.
    fn make(&self, graph: &GraphId) -> Result<Arc<dyn StateMediator<S>>, Error>;
}

/// Factory handing out the same shared mediator for every graph.
pub struct FixedMediatorFactory<S> {
    mediator: Arc<dyn StateMediator<S>>,
}

impl<S> FixedMediatorFactory<S> {
    /// Wrap a mediator.
    pub fn new(mediator: impl StateMediator<S> + 'static) -> Self {
        FixedMediatorFactory {
            mediator: Arc::new(mediator),
        }
    }

    /// Wrap an already-shared mediator.
    pub fn from_shared(mediator: Arc<dyn StateMediator<S>>) -> Self {
        FixedMediatorFactory { mediator }
    }
}

impl<S> MediatorFactory<S> for FixedMediatorFactory<S> {
    fn make(&self, _graph: &GraphId) -> Result<Arc<dyn StateMediator<S>>, Error> {
        Ok(Arc::clone(&self.mediator))
    }
}

/// Factory resolving mediators from an explicit per-graph registry.
pub struct StaticMediatorFactory<S> {
    mediators: HashMap<GraphId, Arc<dyn StateMediator<S>>>,
}

impl<S> StaticMediatorFactory<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        StaticMediatorFactory {
            mediators: HashMap::new(),
        }
    }

    /// Register a mediator for a graph.
    pub fn with(
        mut self,
        graph: impl Into<GraphId>,
        mediator: impl StateMediator<S> + 'static,
    ) -> Self {
        self.mediators.insert(graph.into(), Arc::new(mediator));
        self
    }
}

impl<S> Default for StaticMediatorFactory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MediatorFactory<S> for StaticMediatorFactory<S> {
    fn make(&self, graph: &GraphId) -> Result<Arc<dyn StateMediator<S>>, Error> {
        self.mediators
            .get(graph)
            .cloned()
            .ok_or_else(|| Error::UnknownGraph(graph.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediator::FnMediator;

    struct Order {
        status: Option<String>,
    }

    fn mediator() -> FnMediator<Order> {
        FnMediator::new(
            |order: &Order| order.status.clone(),
            |order: &mut Order, state| order.status = Some(state.to_string()),
        )
    }

    #[test]
    fn fixed_factory_serves_every_graph() {
        let factory = FixedMediatorFactory::new(mediator());

        assert!(factory.make(&GraphId::new("orders")).is_ok());
        assert!(factory.make(&GraphId::new("documents")).is_ok());
    }

    #[test]
    fn fixed_factory_shares_one_mediator() {
        let factory = FixedMediatorFactory::new(mediator());

        let a = factory.make(&GraphId::new("orders")).unwrap();
        let b = factory.make(&GraphId::new("documents")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn static_factory_resolves_registered_graphs_only() {
        let factory = StaticMediatorFactory::new().with("orders", mediator());

        assert!(factory.make(&GraphId::new("orders")).is_ok());
        assert!(matches!(
            factory.make(&GraphId::new("documents")),
            Err(Error::UnknownGraph(_))
        ));
    }
}
