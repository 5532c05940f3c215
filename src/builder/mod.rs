//! Builder API for constructing graphs and transitions.
//!
//! Transitions accumulate in a mutable [`TransitionBuilder`] and freeze into
//! immutable [`Transition`](crate::Transition) values at build time; the
//! [`GraphBuilder`] validates the whole topology eagerly before a graph can
//! exist.

pub mod error;
pub mod graph;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use graph::GraphBuilder;
pub use transition::TransitionBuilder;

use crate::core::state::StateId;
use crate::core::transition::{Transition, TransitionId};

/// Create a builder for a single-origin, unguarded transition.
///
/// # Example
///
/// ```rust
/// use stateward::builder::transition;
/// use stateward::GraphBuilder;
///
/// let graph = GraphBuilder::<()>::new("orders")
///     .state("pending")
///     .state("active")
///     .transition(transition("activate", "pending", "active"))
///     .build()
///     .unwrap();
/// # let _ = graph;
/// ```
pub fn transition<S>(
    id: impl Into<TransitionId>,
    from: impl Into<StateId>,
    to: impl Into<StateId>,
) -> TransitionBuilder<S> {
    TransitionBuilder::new(id).initial(from).to(to)
}

/// Create a builder for a single-origin transition with a guard.
pub fn guarded<S, F>(
    id: impl Into<TransitionId>,
    from: impl Into<StateId>,
    to: impl Into<StateId>,
    guard: F,
) -> TransitionBuilder<S>
where
    F: Fn(&S, &Transition<S>) -> bool + Send + Sync + 'static,
{
    transition(id, from, to).when(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_helper_builds_a_single_origin_edge() {
        let built: Transition<()> = transition("activate", "pending", "active").build().unwrap();

        assert_eq!(built.id().name(), "activate");
        assert_eq!(built.initial_states().len(), 1);
        assert_eq!(built.initial_states()[0].name(), "pending");
        assert_eq!(built.final_state().name(), "active");
        assert!(built.guard().is_none());
    }

    #[test]
    fn guarded_helper_attaches_the_guard() {
        struct Order {
            paid: bool,
        }

        let built = guarded("ship", "packed", "shipped", |order: &Order, _t| order.paid)
            .build()
            .unwrap();

        let guard = built.guard().expect("guard attached");
        assert!(guard.check(&Order { paid: true }, &built));
        assert!(!guard.check(&Order { paid: false }, &built));
    }
}
