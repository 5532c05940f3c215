//! Immutable transitions: named edges through a graph.
//!
//! A `Transition` is produced by freezing a [`TransitionBuilder`] and never
//! changes afterwards. It is pure topology data plus two opaque capability
//! slots, the guard and the side effect, attached at construction time.
//!
//! [`TransitionBuilder`]: crate::builder::TransitionBuilder

use super::guard::{Guard, SideEffect};
use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, immutable name of a transition, scoped to one graph.
///
/// Two graphs may reuse the same transition name independently.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(String);

impl TransitionId {
    /// Create a transition id from a name.
    pub fn new(name: impl Into<String>) -> Self {
        TransitionId(name.into())
    }

    /// The transition's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransitionId {
    fn from(name: &str) -> Self {
        TransitionId::new(name)
    }
}

impl From<String> for TransitionId {
    fn from(name: String) -> Self {
        TransitionId::new(name)
    }
}

impl AsRef<str> for TransitionId {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

/// A named edge: an ordered set of initial states, one final state, and the
/// optional guard and side effect attached when the graph was built.
///
/// The initial-state sequence is non-empty, duplicate-free, and ordered as
/// built. The final state never appears among the initial states; the
/// builder rejects reflexive transitions.
///
/// Equality compares id, initial states, and final state only. Guards and
/// side effects are opaque callables and do not participate.
pub struct Transition<S> {
    id: TransitionId,
    initial_states: Vec<StateId>,
    final_state: StateId,
    guard: Option<Guard<S>>,
    effect: Option<SideEffect<S>>,
}

impl<S> Transition<S> {
    pub(crate) fn new(
        id: TransitionId,
        initial_states: Vec<StateId>,
        final_state: StateId,
        guard: Option<Guard<S>>,
        effect: Option<SideEffect<S>>,
    ) -> Self {
        Transition {
            id,
            initial_states,
            final_state,
            guard,
            effect,
        }
    }

    /// The transition's id.
    pub fn id(&self) -> &TransitionId {
        &self.id
    }

    /// The states this transition may start from, in builder order.
    pub fn initial_states(&self) -> &[StateId] {
        &self.initial_states
    }

    /// The state this transition moves the subject to.
    pub fn final_state(&self) -> &StateId {
        &self.final_state
    }

    /// Whether the given state is one of the initial states.
    pub fn starts_from(&self, state: &StateId) -> bool {
        self.initial_states.contains(state)
    }

    /// The guard attached to this transition, if any.
    pub fn guard(&self) -> Option<&Guard<S>> {
        self.guard.as_ref()
    }

    /// The side effect attached to this transition, if any.
    pub fn effect(&self) -> Option<&SideEffect<S>> {
        self.effect.as_ref()
    }
}

impl<S> Clone for Transition<S> {
    fn clone(&self) -> Self {
        Transition {
            id: self.id.clone(),
            initial_states: self.initial_states.clone(),
            final_state: self.final_state.clone(),
            guard: self.guard.clone(),
            effect: self.effect.clone(),
        }
    }
}

impl<S> fmt::Debug for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("initial_states", &self.initial_states)
            .field("final_state", &self.final_state)
            .field("guard", &self.guard.is_some())
            .field("effect", &self.effect.is_some())
            .finish()
    }
}

impl<S> PartialEq for Transition<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.initial_states == other.initial_states
            && self.final_state == other.final_state
    }
}

impl<S> Eq for Transition<S> {}
