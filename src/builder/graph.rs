//! Builder for constructing validated graphs.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::state::{State, StateId};
use crate::core::transition::Transition;
use crate::graph::{Graph, GraphId};

/// Builder for constructing graphs with a fluent API.
///
/// States and transitions accumulate in call order; `build` runs every
/// topology check eagerly and only then produces the immutable [`Graph`].
///
/// # Example
///
/// ```rust
/// use stateward::{GraphBuilder, TransitionBuilder};
///
/// let graph = GraphBuilder::<()>::new("orders")
///     .state("pending")
///     .state("active")
///     .state("archived")
///     .transition(TransitionBuilder::new("activate").initial("pending").to("active"))
///     .transition(
///         TransitionBuilder::new("archive")
///             .initial("pending")
///             .initial("active")
///             .to("archived"),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.states().len(), 3);
/// assert_eq!(graph.transitions().len(), 2);
/// ```
pub struct GraphBuilder<S> {
    id: GraphId,
    states: Vec<State>,
    transitions: Vec<TransitionBuilder<S>>,
}

impl<S> GraphBuilder<S> {
    /// Create a builder for a graph with the given id.
    pub fn new(id: impl Into<GraphId>) -> Self {
        Self {
            id: id.into(),
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Add a bare state by id.
    pub fn state(mut self, id: impl Into<StateId>) -> Self {
        self.states.push(State::new(id));
        self
    }

    /// Add several bare states in order.
    pub fn states<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StateId>,
    {
        self.states.extend(ids.into_iter().map(State::new));
        self
    }

    /// Add a pre-built state, attributes included.
    pub fn add_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Add a transition via its builder. Validation happens in `build`.
    pub fn transition(mut self, builder: TransitionBuilder<S>) -> Self {
        self.transitions.push(builder);
        self
    }

    /// Validate the topology and produce the immutable graph.
    ///
    /// Checks, in order: the graph has at least one state, state ids are
    /// unique, every transition builds (see [`TransitionBuilder::build`]),
    /// transition ids are unique, and every referenced state id resolves to
    /// a state in the graph.
    pub fn build(self) -> Result<Graph<S>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates(self.id));
        }

        for (i, state) in self.states.iter().enumerate() {
            if self.states[..i].iter().any(|s| s.id() == state.id()) {
                return Err(BuildError::DuplicateState(state.id().clone()));
            }
        }

        let mut transitions: Vec<Transition<S>> = Vec::with_capacity(self.transitions.len());
        for builder in self.transitions {
            let transition = builder.build()?;

            if transitions.iter().any(|t| t.id() == transition.id()) {
                return Err(BuildError::DuplicateTransition(transition.id().clone()));
            }

            let known = |id: &StateId| self.states.iter().any(|s| s.id() == id);
            for initial in transition.initial_states() {
                if !known(initial) {
                    return Err(BuildError::UnknownState {
                        transition: transition.id().clone(),
                        state: initial.clone(),
                    });
                }
            }
            if !known(transition.final_state()) {
                return Err(BuildError::UnknownState {
                    transition: transition.id().clone(),
                    state: transition.final_state().clone(),
                });
            }

            transitions.push(transition);
        }

        Ok(Graph::from_parts(self.id, self.states, transitions))
    }
}
