//! Guard predicates and transition side effects.
//!
//! Both are plain function values attached to a transition at graph
//! construction time. Guards are pure predicates over the subject and the
//! transition; side effects are the one place a transition may touch the
//! subject beyond the state write itself.

use super::transition::Transition;
use crate::error::Error;
use std::sync::Arc;

/// Pure predicate that determines whether a transition is permitted beyond
/// mere state-reachability.
///
/// Guards must not mutate the subject and must be deterministic for a given
/// observable subject state: evaluation relies on both.
///
/// # Example
///
/// ```rust
/// use stateward::Guard;
///
/// struct Invoice {
///     total_cents: u64,
/// }
///
/// let non_empty = Guard::new(|invoice: &Invoice, _t| invoice.total_cents > 0);
/// # let _ = &non_empty;
/// ```
pub struct Guard<S>(Arc<dyn Fn(&S, &Transition<S>) -> bool + Send + Sync>);

impl<S> Guard<S> {
    /// Create a guard from a predicate over `(subject, transition)`.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S, &Transition<S>) -> bool + Send + Sync + 'static,
    {
        Guard(Arc::new(predicate))
    }

    /// Evaluate the predicate. Pure; never mutates the subject.
    pub fn check(&self, subject: &S, transition: &Transition<S>) -> bool {
        (self.0)(subject, transition)
    }
}

impl<S> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Guard(Arc::clone(&self.0))
    }
}

/// Side effect invoked during `apply`, after the evaluation passes and
/// before the new state is written.
///
/// A failing side effect aborts the application: the error propagates as-is
/// and the subject's state is not written.
pub struct SideEffect<S>(Arc<dyn Fn(&mut S, &Transition<S>) -> Result<(), Error> + Send + Sync>);

impl<S> SideEffect<S> {
    /// Create a side effect from a fallible callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut S, &Transition<S>) -> Result<(), Error> + Send + Sync + 'static,
    {
        SideEffect(Arc::new(callback))
    }

    /// Run the side effect against the subject.
    pub fn run(&self, subject: &mut S, transition: &Transition<S>) -> Result<(), Error> {
        (self.0)(subject, transition)
    }
}

impl<S> Clone for SideEffect<S> {
    fn clone(&self) -> Self {
        SideEffect(Arc::clone(&self.0))
    }
}
