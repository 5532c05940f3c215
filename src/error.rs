//! Error taxonomy for the transition engine.

use crate::core::evaluation::Evaluation;
use crate::core::state::StateId;
use crate::core::transition::TransitionId;
use crate::graph::GraphId;
use thiserror::Error;

/// Errors raised by graphs, mediators, machines, and factories.
///
/// Everything except [`Error::CannotTransition`] indicates a programmer or
/// configuration mistake and should propagate uncaught. `CannotTransition`
/// is the one expected business outcome: the transition is simply not
/// applicable to the subject right now, and the carried [`Evaluation`]
/// explains why.
#[derive(Debug, Error)]
pub enum Error {
    /// A factory was asked to build a machine for a subject it does not
    /// handle. Never raised by the machine itself.
    #[error("unsupported subject: {0}")]
    UnsupportedSubject(String),

    /// A state id did not resolve in the graph.
    #[error("unknown state '{0}'")]
    UnknownState(StateId),

    /// A transition id did not resolve in the graph.
    #[error("unknown transition '{0}'")]
    UnknownTransition(TransitionId),

    /// A graph id did not resolve in any loader.
    #[error("unknown graph '{0}'")]
    UnknownGraph(GraphId),

    /// The mediator read a raw state value that cannot be interpreted at
    /// all, e.g. unset or empty. Distinct from [`Error::UnknownState`],
    /// which means a well-formed id missing from the graph.
    #[error("invalid subject state: {0}")]
    InvalidSubjectState(String),

    /// The expected, recoverable outcome of a failed `apply`.
    #[error("cannot apply transition '{}': {}", .evaluation.transition(), .evaluation.summary())]
    CannotTransition { evaluation: Evaluation },

    /// A transition side effect failed; the state write did not happen.
    #[error("transition side effect failed: {0}")]
    Effect(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary error as a side-effect failure.
    pub fn effect(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Effect(source.into())
    }

    /// The evaluation carried by a `CannotTransition`, if this is one.
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            Error::CannotTransition { evaluation } => Some(evaluation),
            _ => None,
        }
    }
}
