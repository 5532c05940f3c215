//! Builder for constructing transitions.
//!
//! The builder is the mutable variant of a transition: initial states are
//! appended during graph construction, and `build` freezes them into an
//! immutable [`Transition`] with the same id, final state, and initial-state
//! order.

use crate::builder::error::BuildError;
use crate::core::guard::{Guard, SideEffect};
use crate::core::state::StateId;
use crate::core::transition::{Transition, TransitionId};
use crate::error::Error;

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use stateward::TransitionBuilder;
///
/// let activate = TransitionBuilder::<()>::new("activate")
///     .initial("pending")
///     .initial("inactive")
///     .to("active")
///     .build()
///     .unwrap();
///
/// assert_eq!(activate.id().name(), "activate");
/// assert_eq!(activate.final_state().name(), "active");
/// assert_eq!(activate.initial_states().len(), 2);
/// ```
pub struct TransitionBuilder<S> {
    id: TransitionId,
    initial_states: Vec<StateId>,
    final_state: Option<StateId>,
    guard: Option<Guard<S>>,
    effect: Option<SideEffect<S>>,
}

impl<S> TransitionBuilder<S> {
    /// Create a builder for a transition with the given id.
    pub fn new(id: impl Into<TransitionId>) -> Self {
        Self {
            id: id.into(),
            initial_states: Vec::new(),
            final_state: None,
            guard: None,
            effect: None,
        }
    }

    /// Append an initial state. Order is preserved through `build`.
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial_states.push(state.into());
        self
    }

    /// Append several initial states in order.
    pub fn initials<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StateId>,
    {
        self.initial_states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the final state (required).
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.final_state = Some(state.into());
        self
    }

    /// Attach a guard (optional).
    pub fn guard(mut self, guard: Guard<S>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Attach a guard from a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&S, &Transition<S>) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Attach a side effect (optional), run on `apply` before the state
    /// write.
    pub fn effect<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut S, &Transition<S>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.effect = Some(SideEffect::new(callback));
        self
    }

    /// The transition's id.
    pub fn id(&self) -> &TransitionId {
        &self.id
    }

    /// The initial states accumulated so far, in append order.
    pub fn initial_states(&self) -> &[StateId] {
        &self.initial_states
    }

    /// The final state, if set.
    pub fn final_state(&self) -> Option<&StateId> {
        self.final_state.as_ref()
    }

    /// Freeze into an immutable transition.
    ///
    /// Validates that at least one initial state exists, that no initial
    /// state repeats, that a final state was set, and that the final state
    /// is not also an initial state.
    pub fn build(self) -> Result<Transition<S>, BuildError> {
        if self.initial_states.is_empty() {
            return Err(BuildError::NoInitialStates(self.id));
        }

        for (i, state) in self.initial_states.iter().enumerate() {
            if self.initial_states[..i].contains(state) {
                return Err(BuildError::DuplicateInitialState {
                    transition: self.id,
                    state: state.clone(),
                });
            }
        }

        let final_state = self
            .final_state
            .ok_or_else(|| BuildError::MissingFinalState(self.id.clone()))?;

        if self.initial_states.contains(&final_state) {
            return Err(BuildError::Reflexive {
                transition: self.id,
                state: final_state,
            });
        }

        Ok(Transition::new(
            self.id,
            self.initial_states,
            final_state,
            self.guard,
            self.effect,
        ))
    }
}
