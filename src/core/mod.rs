//! Core value types: state and transition identities, guards, evaluations,
//! and the transition audit log.

pub mod evaluation;
pub mod guard;
pub mod history;
pub mod state;
pub mod transition;

pub use evaluation::{Evaluation, Rejection};
pub use guard::{Guard, SideEffect};
pub use history::{TransitionLog, TransitionRecord};
pub use state::{State, StateId};
pub use transition::{Transition, TransitionId};
