//! The seam between the engine and a subject's stored state.
//!
//! A mediator translates between the engine's abstract [`StateId`] and
//! however a subject actually stores its state: a field, a nested value
//! object, a computed property. The machine never reads or writes the
//! subject directly; it goes through the mediator, which is why any domain
//! object can gain machine behavior without implementing an engine trait.

pub mod factory;

use crate::core::state::StateId;
use crate::error::Error;

pub use factory::{FixedMediatorFactory, MediatorFactory, StaticMediatorFactory};

/// Reads and writes the "current state" concept on a subject.
///
/// Mediators are long-lived strategy objects, selected per subject type by a
/// factory, shared read-only across machines. `state` must not mutate the
/// subject; `set_state` is the single point where the subject is mutated.
pub trait StateMediator<S>: Send + Sync {
    /// Read the subject's current state.
    ///
    /// Fails with [`Error::InvalidSubjectState`] when the raw value cannot
    /// be interpreted at all (unset, empty). Whether the id exists in the
    /// graph is the machine's check, not the mediator's.
    fn state(&self, subject: &S) -> Result<StateId, Error>;

    /// Write the new state onto the subject.
    fn set_state(&self, subject: &mut S, state: &StateId) -> Result<(), Error>;
}

/// Mediator adapting any subject through a reader and a writer closure.
///
/// The reader returns the raw stored value; `None` or an empty string is
/// surfaced as [`Error::InvalidSubjectState`].
///
/// # Example
///
/// ```rust
/// use stateward::{FnMediator, StateId, StateMediator};
///
/// struct Order {
///     status: Option<String>,
/// }
///
/// let mediator = FnMediator::new(
///     |order: &Order| order.status.clone(),
///     |order: &mut Order, state| order.status = Some(state.to_string()),
/// );
///
/// let mut order = Order { status: Some("pending".into()) };
/// assert_eq!(mediator.state(&order).unwrap(), StateId::new("pending"));
///
/// mediator.set_state(&mut order, &StateId::new("active")).unwrap();
/// assert_eq!(order.status.as_deref(), Some("active"));
/// ```
pub struct FnMediator<S> {
    read: Box<dyn Fn(&S) -> Option<String> + Send + Sync>,
    write: Box<dyn Fn(&mut S, &str) + Send + Sync>,
}

impl<S> FnMediator<S> {
    /// Create a mediator from a reader and a writer.
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&S) -> Option<String> + Send + Sync + 'static,
        W: Fn(&mut S, &str) + Send + Sync + 'static,
    {
        FnMediator {
            read: Box::new(read),
            write: Box::new(write),
        }
    }
}

impl<S> StateMediator<S> for FnMediator<S> {
    fn state(&self, subject: &S) -> Result<StateId, Error> {
        match (self.read)(subject) {
            Some(raw) if !raw.is_empty() => Ok(StateId::new(raw)),
            Some(_) => Err(Error::InvalidSubjectState(
                "subject reports an empty state value".to_string(),
            )),
            None => Err(Error::InvalidSubjectState(
                "subject has no state set".to_string(),
            )),
        }
    }

    fn set_state(&self, subject: &mut S, state: &StateId) -> Result<(), Error> {
        (self.write)(subject, state.name());
        Ok(())
    }
}
