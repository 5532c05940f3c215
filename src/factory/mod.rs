//! Machine assembly: selecting the right mediator/graph pairing for a
//! subject.
//!
//! A factory guarantees the mediator and graph it hands to a machine are
//! mutually consistent. Multiple factories compose into a [`FactoryChain`],
//! an explicit registry evaluated in push order with an
//! [`Error::UnsupportedSubject`] fallback.

use crate::error::Error;
use crate::graph::loader::GraphLoader;
use crate::graph::GraphId;
use crate::machine::ConcreteStateMachine;
use crate::mediator::factory::MediatorFactory;
use std::sync::Arc;

/// Predicate deciding whether a factory handles a given subject.
pub type SupportsTest<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// Assembles machines for the subjects it supports.
pub trait StateMachineFactory<S> {
    /// Whether this factory handles the subject. Pure; must not mutate.
    fn supports(&self, subject: &S) -> bool;

    /// Build a machine for the subject against the named graph.
    ///
    /// Fails with [`Error::UnsupportedSubject`] when [`supports`] is false,
    /// before any mediator or graph is constructed.
    ///
    /// [`supports`]: StateMachineFactory::supports
    fn make<'a>(
        &self,
        subject: &'a mut S,
        graph: &GraphId,
    ) -> Result<ConcreteStateMachine<'a, S>, Error>;
}

/// Factory composing a mediator factory, a graph loader, and a supports
/// predicate.
///
/// # Example
///
/// ```rust
/// use stateward::{
///     ConcreteStateMachineFactory, FixedMediatorFactory, FnMediator, GraphBuilder, GraphId,
///     StateMachine, StateMachineFactory, StaticGraphLoader, TransitionBuilder,
/// };
/// use std::sync::Arc;
///
/// struct Order {
///     status: Option<String>,
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let graph = GraphBuilder::new("orders")
///     .state("pending")
///     .state("active")
///     .transition(TransitionBuilder::new("activate").initial("pending").to("active"))
///     .build()?;
///
/// let factory = ConcreteStateMachineFactory::new(
///     Arc::new(FixedMediatorFactory::new(FnMediator::new(
///         |order: &Order| order.status.clone(),
///         |order: &mut Order, state| order.status = Some(state.to_string()),
///     ))),
///     Arc::new(StaticGraphLoader::new().with(graph)),
///     |order: &Order| order.status.is_some(),
/// );
///
/// let mut order = Order { status: Some("pending".into()) };
/// assert!(factory.supports(&order));
///
/// let machine = factory.make(&mut order, &GraphId::new("orders"))?;
/// assert_eq!(machine.current_state()?.name(), "pending");
/// # Ok(())
/// # }
/// ```
pub struct ConcreteStateMachineFactory<S> {
    mediators: Arc<dyn MediatorFactory<S>>,
    loader: Arc<dyn GraphLoader<S>>,
    test: SupportsTest<S>,
}

impl<S> ConcreteStateMachineFactory<S> {
    /// Compose a factory from its collaborators and a supports predicate.
    pub fn new(
        mediators: Arc<dyn MediatorFactory<S>>,
        loader: Arc<dyn GraphLoader<S>>,
        test: impl Fn(&S) -> bool + Send + Sync + 'static,
    ) -> Self {
        ConcreteStateMachineFactory {
            mediators,
            loader,
            test: Arc::new(test),
        }
    }
}

impl<S> StateMachineFactory<S> for ConcreteStateMachineFactory<S> {
    fn supports(&self, subject: &S) -> bool {
        (self.test)(subject)
    }

    fn make<'a>(
        &self,
        subject: &'a mut S,
        graph: &GraphId,
    ) -> Result<ConcreteStateMachine<'a, S>, Error> {
        if !self.supports(subject) {
            return Err(Error::UnsupportedSubject(
                "this state machine factory does not support the given subject".to_string(),
            ));
        }

        let mediator = self.mediators.make(graph)?;
        let graph = self.loader.make(graph)?;

        Ok(ConcreteStateMachine::new(mediator, graph, subject))
    }
}

/// Ordered registry of factories; the first whose predicate matches builds
/// the machine.
pub struct FactoryChain<S> {
    factories: Vec<Box<dyn StateMachineFactory<S> + Send + Sync>>,
}

impl<S> FactoryChain<S> {
    /// Create an empty chain.
    pub fn new() -> Self {
        FactoryChain {
            factories: Vec::new(),
        }
    }

    /// Append a factory; earlier factories win ties.
    pub fn push(mut self, factory: impl StateMachineFactory<S> + Send + Sync + 'static) -> Self {
        self.factories.push(Box::new(factory));
        self
    }
}

impl<S> Default for FactoryChain<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateMachineFactory<S> for FactoryChain<S> {
    fn supports(&self, subject: &S) -> bool {
        self.factories.iter().any(|f| f.supports(subject))
    }

    fn make<'a>(
        &self,
        subject: &'a mut S,
        graph: &GraphId,
    ) -> Result<ConcreteStateMachine<'a, S>, Error> {
        let factory = self
            .factories
            .iter()
            .find(|f| f.supports(subject))
            .ok_or_else(|| {
                Error::UnsupportedSubject(
                    "no registered state machine factory supports the given subject".to_string(),
                )
            })?;
        factory.make(subject, graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{GraphBuilder, TransitionBuilder};
    use crate::machine::StateMachine;
    use crate::mediator::factory::FixedMediatorFactory;
    use crate::mediator::FnMediator;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Kind {
        Retail,
        Wholesale,
    }

    struct Order {
        kind: Kind,
        status: Option<String>,
    }

    fn factory_for(kind: Kind) -> ConcreteStateMachineFactory<Order> {
        let graph = GraphBuilder::new("orders")
            .state("pending")
            .state("active")
            .transition(TransitionBuilder::new("activate").initial("pending").to("active"))
            .build()
            .unwrap();

        ConcreteStateMachineFactory::new(
            Arc::new(FixedMediatorFactory::new(FnMediator::new(
                |order: &Order| order.status.clone(),
                |order: &mut Order, state| order.status = Some(state.to_string()),
            ))),
            Arc::new(crate::graph::loader::StaticGraphLoader::new().with(graph)),
            move |order: &Order| order.kind == kind,
        )
    }

    #[test]
    fn make_refuses_unsupported_subjects() {
        let factory = factory_for(Kind::Retail);
        let mut order = Order {
            kind: Kind::Wholesale,
            status: Some("pending".to_string()),
        };

        assert!(!factory.supports(&order));
        let result = factory.make(&mut order, &GraphId::new("orders"));
        assert!(matches!(result, Err(Error::UnsupportedSubject(_))));
    }

    #[test]
    fn make_builds_machines_for_supported_subjects() {
        let factory = factory_for(Kind::Retail);
        let mut order = Order {
            kind: Kind::Retail,
            status: Some("pending".to_string()),
        };

        let machine = factory.make(&mut order, &GraphId::new("orders")).unwrap();
        assert_eq!(machine.current_state().unwrap().name(), "pending");
    }

    #[test]
    fn make_propagates_unknown_graphs() {
        let factory = factory_for(Kind::Retail);
        let mut order = Order {
            kind: Kind::Retail,
            status: Some("pending".to_string()),
        };

        let result = factory.make(&mut order, &GraphId::new("documents"));
        assert!(matches!(result, Err(Error::UnknownGraph(_))));
    }

    #[test]
    fn chain_picks_the_first_supporting_factory() {
        let chain = FactoryChain::new()
            .push(factory_for(Kind::Retail))
            .push(factory_for(Kind::Wholesale));

        let mut wholesale = Order {
            kind: Kind::Wholesale,
            status: Some("pending".to_string()),
        };
        assert!(chain.supports(&wholesale));
        assert!(chain.make(&mut wholesale, &GraphId::new("orders")).is_ok());
    }

    #[test]
    fn chain_falls_back_to_unsupported_subject() {
        let chain = FactoryChain::new().push(factory_for(Kind::Retail));

        let mut order = Order {
            kind: Kind::Wholesale,
            status: Some("pending".to_string()),
        };
        assert!(!chain.supports(&order));
        let result = chain.make(&mut order, &GraphId::new("orders"));
        assert!(matches!(result, Err(Error::UnsupportedSubject(_))));
    }
}
