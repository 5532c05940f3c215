//! Validation errors raised while building transitions and graphs.

use crate::core::state::StateId;
use crate::core::transition::TransitionId;
use crate::graph::GraphId;
use thiserror::Error;

/// Errors that can occur when building transitions and graphs.
///
/// All topology problems surface here, at construction time. A graph that
/// would violate its closure invariant fails to build instead of failing
/// later at evaluation time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("graph '{0}' has no states")]
    NoStates(GraphId),

    #[error("duplicate state '{0}' in graph")]
    DuplicateState(StateId),

    #[error("duplicate transition '{0}' in graph")]
    DuplicateTransition(TransitionId),

    #[error("transition '{0}' has no initial states. Call .initial(state)")]
    NoInitialStates(TransitionId),

    #[error("duplicate initial state '{state}' on transition '{transition}'")]
    DuplicateInitialState {
        transition: TransitionId,
        state: StateId,
    },

    #[error("transition '{0}' has no final state. Call .to(state)")]
    MissingFinalState(TransitionId),

    #[error("transition '{transition}' is reflexive: final state '{state}' is also an initial state")]
    Reflexive {
        transition: TransitionId,
        state: StateId,
    },

    #[error("transition '{transition}' references state '{state}' not present in the graph")]
    UnknownState {
        transition: TransitionId,
        state: StateId,
    },
}
