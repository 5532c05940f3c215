//! Stateward: a graph-driven state machine engine for arbitrary domain
//! objects.
//!
//! Any subject can acquire finite-state-machine behavior without
//! implementing a state-machine trait itself. The topology lives in an
//! immutable, shared [`Graph`]; a [`StateMediator`] adapts the subject's own
//! state representation; and a transient [`ConcreteStateMachine`] binds the
//! two to one subject to evaluate and apply transitions.
//!
//! # Core Concepts
//!
//! - **Graph**: the immutable set of states and transitions for one kind of
//!   subject, validated eagerly at build time
//! - **Mediator**: the adapter between the engine's [`StateId`] and the
//!   subject's stored state
//! - **Evaluation**: the structured, inspectable result of checking whether
//!   a transition may currently be applied
//! - **Guard**: a pure predicate gating a transition beyond reachability
//!
//! # Example
//!
//! ```rust
//! use stateward::{
//!     ConcreteStateMachine, FnMediator, GraphBuilder, StateMachine, TransitionBuilder,
//!     TransitionId,
//! };
//! use std::sync::Arc;
//!
//! struct Subscription {
//!     status: Option<String>,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = GraphBuilder::new("subscriptions")
//!     .state("pending")
//!     .state("active")
//!     .state("cancelled")
//!     .transition(TransitionBuilder::new("activate").initial("pending").to("active"))
//!     .transition(
//!         TransitionBuilder::new("cancel")
//!             .initial("pending")
//!             .initial("active")
//!             .to("cancelled"),
//!     )
//!     .build()?;
//!
//! let mediator = FnMediator::new(
//!     |s: &Subscription| s.status.clone(),
//!     |s: &mut Subscription, state| s.status = Some(state.to_string()),
//! );
//!
//! let mut subscription = Subscription { status: Some("pending".into()) };
//! let mut machine =
//!     ConcreteStateMachine::new(Arc::new(mediator), Arc::new(graph), &mut subscription);
//!
//! let activate = TransitionId::new("activate");
//! let evaluation = machine.evaluate(&activate)?;
//! assert!(evaluation.is_valid());
//!
//! machine.apply(&activate)?;
//! assert_eq!(machine.current_state()?.name(), "active");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod error;
pub mod factory;
pub mod graph;
pub mod machine;
pub mod mediator;

// Re-export commonly used types
pub use self::builder::{BuildError, GraphBuilder, TransitionBuilder};
pub use self::core::{
    Evaluation, Guard, Rejection, SideEffect, State, StateId, Transition, TransitionId,
    TransitionLog, TransitionRecord,
};
pub use self::error::Error;
pub use self::factory::{
    ConcreteStateMachineFactory, FactoryChain, StateMachineFactory, SupportsTest,
};
pub use self::graph::loader::{ChainGraphLoader, GraphLoader, StaticGraphLoader};
pub use self::graph::{Graph, GraphId};
pub use self::machine::{ConcreteStateMachine, StateMachine};
pub use self::mediator::{
    FixedMediatorFactory, FnMediator, MediatorFactory, StateMediator, StaticMediatorFactory,
};
