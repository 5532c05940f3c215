//! Structured outcome of checking a transition against a subject.
//!
//! An `Evaluation` answers "can this transition be applied right now, and if
//! not, why" without mutating anything. It is built once and never modified.

use super::state::StateId;
use super::transition::TransitionId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One reason a transition cannot currently be applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Rejection {
    /// The subject's current state is not among the transition's initial
    /// states.
    #[error("state '{current}' is not an initial state of transition '{transition}'")]
    NotReachable {
        transition: TransitionId,
        current: StateId,
    },

    /// The transition is reachable but its guard rejected the subject.
    #[error("guard rejected transition '{transition}'")]
    GuardRejected { transition: TransitionId },
}

/// The outcome of evaluating one `(subject, transition)` pair.
///
/// Valid when the rejection list is empty: the subject's current state is an
/// initial state of the transition and the guard, if any, passed. Carried
/// inside [`Error::CannotTransition`] so a failed `apply` can be explained
/// without re-running `evaluate`.
///
/// [`Error::CannotTransition`]: crate::Error::CannotTransition
///
/// # Example
///
/// ```rust
/// use stateward::{Evaluation, Rejection, StateId, TransitionId};
///
/// let blocked = Evaluation::invalid(
///     TransitionId::new("activate"),
///     StateId::new("archived"),
///     vec![Rejection::NotReachable {
///         transition: TransitionId::new("activate"),
///         current: StateId::new("archived"),
///     }],
/// );
///
/// assert!(!blocked.is_valid());
/// assert!(!blocked.is_reachable());
/// assert!(blocked.guard_passed());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    transition: TransitionId,
    current_state: StateId,
    rejections: Vec<Rejection>,
}

impl Evaluation {
    /// A positive evaluation: the transition may be applied.
    pub fn valid(transition: TransitionId, current_state: StateId) -> Self {
        Evaluation {
            transition,
            current_state,
            rejections: Vec::new(),
        }
    }

    /// A negative evaluation carrying at least one rejection.
    pub fn invalid(
        transition: TransitionId,
        current_state: StateId,
        rejections: Vec<Rejection>,
    ) -> Self {
        Evaluation {
            transition,
            current_state,
            rejections,
        }
    }

    /// Whether the transition may be applied: reachable and guard passed.
    pub fn is_valid(&self) -> bool {
        self.rejections.is_empty()
    }

    /// Whether the subject's current state was among the initial states.
    pub fn is_reachable(&self) -> bool {
        !self
            .rejections
            .iter()
            .any(|r| matches!(r, Rejection::NotReachable { .. }))
    }

    /// Whether the guard passed (vacuously true when the guard never ran).
    pub fn guard_passed(&self) -> bool {
        !self
            .rejections
            .iter()
            .any(|r| matches!(r, Rejection::GuardRejected { .. }))
    }

    /// The transition that was evaluated.
    pub fn transition(&self) -> &TransitionId {
        &self.transition
    }

    /// The subject's current state at evaluation time.
    pub fn current_state(&self) -> &StateId {
        &self.current_state
    }

    /// The rejections, empty when valid.
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Human-readable summary of the outcome.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return "ok".to_string();
        }
        self.rejections
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_reachable() -> Rejection {
        Rejection::NotReachable {
            transition: TransitionId::new("activate"),
            current: StateId::new("active"),
        }
    }

    fn guard_rejected() -> Rejection {
        Rejection::GuardRejected {
            transition: TransitionId::new("activate"),
        }
    }

    #[test]
    fn valid_evaluation_has_no_rejections() {
        let evaluation =
            Evaluation::valid(TransitionId::new("activate"), StateId::new("pending"));

        assert!(evaluation.is_valid());
        assert!(evaluation.is_reachable());
        assert!(evaluation.guard_passed());
        assert!(evaluation.rejections().is_empty());
        assert_eq!(evaluation.summary(), "ok");
    }

    #[test]
    fn not_reachable_is_reported() {
        let evaluation = Evaluation::invalid(
            TransitionId::new("activate"),
            StateId::new("active"),
            vec![not_reachable()],
        );

        assert!(!evaluation.is_valid());
        assert!(!evaluation.is_reachable());
        assert!(evaluation.guard_passed());
        assert!(evaluation.summary().contains("not an initial state"));
    }

    #[test]
    fn guard_rejection_is_reported() {
        let evaluation = Evaluation::invalid(
            TransitionId::new("activate"),
            StateId::new("pending"),
            vec![guard_rejected()],
        );

        assert!(!evaluation.is_valid());
        assert!(evaluation.is_reachable());
        assert!(!evaluation.guard_passed());
    }

    #[test]
    fn evaluation_round_trips_through_json() {
        let evaluation = Evaluation::invalid(
            TransitionId::new("activate"),
            StateId::new("active"),
            vec![not_reachable(), guard_rejected()],
        );

        let json = serde_json::to_string(&evaluation).unwrap();
        let back: Evaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, evaluation);
    }
}
