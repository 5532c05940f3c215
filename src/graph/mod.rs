//! The closed topology of states and transitions for one kind of subject.
//!
//! A graph is built once through [`GraphBuilder`], validated eagerly, and
//! shared read-only (typically as `Arc<Graph<S>>`) across every machine
//! created from it. It carries no per-subject data.
//!
//! [`GraphBuilder`]: crate::builder::GraphBuilder

pub mod loader;

use crate::core::state::{State, StateId};
use crate::core::transition::{Transition, TransitionId};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique, immutable name of a graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(String);

impl GraphId {
    /// Create a graph id from a name.
    pub fn new(name: impl Into<String>) -> Self {
        GraphId(name.into())
    }

    /// The graph's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GraphId {
    fn from(name: &str) -> Self {
        GraphId::new(name)
    }
}

impl From<String> for GraphId {
    fn from(name: String) -> Self {
        GraphId::new(name)
    }
}

/// Immutable state/transition topology.
///
/// Every state id referenced by any transition resolves to a state in the
/// graph; the builder guarantees this before a `Graph` value can exist.
pub struct Graph<S> {
    id: GraphId,
    states: Vec<State>,
    state_index: HashMap<StateId, usize>,
    transitions: Vec<Transition<S>>,
    transition_index: HashMap<TransitionId, usize>,
}

impl<S> Graph<S> {
    /// Assemble a graph from parts already validated by the builder.
    pub(crate) fn from_parts(
        id: GraphId,
        states: Vec<State>,
        transitions: Vec<Transition<S>>,
    ) -> Self {
        let state_index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id().clone(), i))
            .collect();
        let transition_index = transitions
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id().clone(), i))
            .collect();

        Graph {
            id,
            states,
            state_index,
            transitions,
            transition_index,
        }
    }

    /// The graph's id.
    pub fn id(&self) -> &GraphId {
        &self.id
    }

    /// All states, in construction order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// All transitions, in construction order.
    pub fn transitions(&self) -> &[Transition<S>] {
        &self.transitions
    }

    /// Whether the graph contains the given state.
    pub fn contains_state(&self, id: &StateId) -> bool {
        self.state_index.contains_key(id)
    }

    /// Resolve a state by id.
    pub fn state(&self, id: &StateId) -> Result<&State, Error> {
        self.state_index
            .get(id)
            .map(|&i| &self.states[i])
            .ok_or_else(|| Error::UnknownState(id.clone()))
    }

    /// Resolve a transition by id.
    pub fn transition(&self, id: &TransitionId) -> Result<&Transition<S>, Error> {
        self.transition_index
            .get(id)
            .map(|&i| &self.transitions[i])
            .ok_or_else(|| Error::UnknownTransition(id.clone()))
    }

    /// All transitions that may start from the given state, in construction
    /// order. Deterministic, not sorted.
    pub fn transitions_from(&self, state: &StateId) -> Vec<&Transition<S>> {
        self.transitions
            .iter()
            .filter(|t| t.starts_from(state))
            .collect()
    }
}

impl<S> fmt::Debug for Graph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .finish()
    }
}
