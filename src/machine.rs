//! The state machine bound to one subject.
//!
//! A machine is a transient view: it borrows the subject, shares the graph
//! and mediator, and is cheap to recreate per interaction. It enforces the
//! one invariant that matters: a transition is applied only if the subject's
//! current state is among the transition's initial states and the guard
//! passes.

use crate::core::evaluation::{Evaluation, Rejection};
use crate::core::history::{TransitionLog, TransitionRecord};
use crate::core::state::State;
use crate::core::transition::{Transition, TransitionId};
use crate::error::Error;
use crate::graph::Graph;
use crate::mediator::StateMediator;
use chrono::Utc;
use log::{debug, trace};
use std::sync::Arc;

/// The public surface of a machine bound to one subject.
pub trait StateMachine<S> {
    /// The subject of the state machine.
    fn subject(&self) -> &S;

    /// The state graph being used.
    fn graph(&self) -> &Graph<S>;

    /// The subject's current state, resolved against the graph.
    ///
    /// Fails with [`Error::InvalidSubjectState`] when the subject's raw
    /// value is uninterpretable, or [`Error::UnknownState`] when the
    /// reported state is absent from the graph. Both are consistency
    /// violations between subject and graph, fatal and never retried.
    fn current_state(&self) -> Result<&State, Error>;

    /// All transitions leaving the subject's current state, in graph
    /// construction order.
    fn available_transitions(&self) -> Result<Vec<&Transition<S>>, Error>;

    /// Check whether a transition may be applied, without mutating anything.
    ///
    /// Side-effect-free and idempotent: with no intervening state change,
    /// repeated calls yield identical results.
    fn evaluate(&self, transition: &TransitionId) -> Result<Evaluation, Error>;

    /// Apply a transition.
    ///
    /// A negative evaluation fails with [`Error::CannotTransition`] carrying
    /// the full [`Evaluation`]. Otherwise the transition's side effect runs
    /// first; if it fails, the error propagates and the state is not
    /// written. Only then is the new state written through the mediator.
    fn apply(&mut self, transition: &TransitionId) -> Result<(), Error>;
}

/// Machine binding a subject, a graph, and a mediator together.
///
/// The graph and mediator are shared, read-only collaborators; the subject
/// stays owned by the caller and is only borrowed for the machine's
/// lifetime.
///
/// # Example
///
/// ```rust
/// use stateward::{
///     ConcreteStateMachine, FnMediator, GraphBuilder, StateMachine, TransitionBuilder,
///     TransitionId,
/// };
/// use std::sync::Arc;
///
/// struct Order {
///     status: Option<String>,
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let graph = GraphBuilder::new("orders")
///     .state("pending")
///     .state("active")
///     .transition(TransitionBuilder::new("activate").initial("pending").to("active"))
///     .build()?;
///
/// let mediator = FnMediator::new(
///     |order: &Order| order.status.clone(),
///     |order: &mut Order, state| order.status = Some(state.to_string()),
/// );
///
/// let mut order = Order { status: Some("pending".into()) };
/// let mut machine = ConcreteStateMachine::new(Arc::new(mediator), Arc::new(graph), &mut order);
///
/// let activate = TransitionId::new("activate");
/// assert!(machine.evaluate(&activate)?.is_valid());
///
/// machine.apply(&activate)?;
/// assert_eq!(machine.current_state()?.name(), "active");
/// # Ok(())
/// # }
/// ```
pub struct ConcreteStateMachine<'a, S> {
    mediator: Arc<dyn StateMediator<S>>,
    graph: Arc<Graph<S>>,
    subject: &'a mut S,
    log: TransitionLog,
}

impl<'a, S> ConcreteStateMachine<'a, S> {
    /// Bind a mediator, a graph, and a subject into a machine.
    ///
    /// The caller (normally a factory) is responsible for handing in a
    /// mediator and graph that are mutually consistent.
    pub fn new(
        mediator: Arc<dyn StateMediator<S>>,
        graph: Arc<Graph<S>>,
        subject: &'a mut S,
    ) -> Self {
        ConcreteStateMachine {
            mediator,
            graph,
            subject,
            log: TransitionLog::new(),
        }
    }

    /// The transitions this machine has applied, oldest first.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// The shared graph handle.
    pub fn graph_handle(&self) -> &Arc<Graph<S>> {
        &self.graph
    }
}

impl<'a, S> StateMachine<S> for ConcreteStateMachine<'a, S> {
    fn subject(&self) -> &S {
        &*self.subject
    }

    fn graph(&self) -> &Graph<S> {
        &self.graph
    }

    fn current_state(&self) -> Result<&State, Error> {
        let id = self.mediator.state(&*self.subject)?;
        self.graph.state(&id)
    }

    fn available_transitions(&self) -> Result<Vec<&Transition<S>>, Error> {
        let current = self.current_state()?;
        Ok(self.graph.transitions_from(current.id()))
    }

    fn evaluate(&self, transition: &TransitionId) -> Result<Evaluation, Error> {
        let resolved = self.graph.transition(transition)?;
        let current = self.current_state()?;

        let mut rejections = Vec::new();
        if !resolved.starts_from(current.id()) {
            rejections.push(Rejection::NotReachable {
                transition: transition.clone(),
                current: current.id().clone(),
            });
        } else if let Some(guard) = resolved.guard() {
            if !guard.check(&*self.subject, resolved) {
                rejections.push(Rejection::GuardRejected {
                    transition: transition.clone(),
                });
            }
        }

        trace!(
            "evaluated '{}' at '{}': {}",
            transition,
            current.id(),
            if rejections.is_empty() { "valid" } else { "invalid" }
        );

        if rejections.is_empty() {
            Ok(Evaluation::valid(transition.clone(), current.id().clone()))
        } else {
            Ok(Evaluation::invalid(
                transition.clone(),
                current.id().clone(),
                rejections,
            ))
        }
    }

    fn apply(&mut self, transition: &TransitionId) -> Result<(), Error> {
        let evaluation = self.evaluate(transition)?;
        if !evaluation.is_valid() {
            debug!("refusing '{}': {}", transition, evaluation.summary());
            return Err(Error::CannotTransition { evaluation });
        }

        let graph = Arc::clone(&self.graph);
        let resolved = graph.transition(transition)?;

        // Effect first: a failing effect must leave the state unwritten.
        if let Some(effect) = resolved.effect() {
            effect.run(&mut *self.subject, resolved)?;
        }
        self.mediator
            .set_state(&mut *self.subject, resolved.final_state())?;

        debug!(
            "applied '{}': {} -> {}",
            transition,
            evaluation.current_state(),
            resolved.final_state()
        );

        let record = TransitionRecord {
            transition: transition.clone(),
            from: evaluation.current_state().clone(),
            to: resolved.final_state().clone(),
            timestamp: Utc::now(),
        };
        self.log = std::mem::take(&mut self.log).record(record);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{GraphBuilder, TransitionBuilder};
    use crate::mediator::FnMediator;

    struct Order {
        status: Option<String>,
        paid: bool,
        shipments: u32,
    }

    impl Order {
        fn at(status: &str) -> Self {
            Order {
                status: Some(status.to_string()),
                paid: false,
                shipments: 0,
            }
        }
    }

    fn mediator() -> Arc<dyn StateMediator<Order>> {
        Arc::new(FnMediator::new(
            |order: &Order| order.status.clone(),
            |order: &mut Order, state| order.status = Some(state.to_string()),
        ))
    }

    fn graph() -> Arc<Graph<Order>> {
        Arc::new(
            GraphBuilder::new("orders")
                .states(["pending", "active", "shipped", "archived"])
                .transition(TransitionBuilder::new("activate").initial("pending").to("active"))
                .transition(
                    TransitionBuilder::new("ship")
                        .initial("active")
                        .to("shipped")
                        .when(|order: &Order, _t| order.paid)
                        .effect(|order: &mut Order, _t| {
                            order.shipments += 1;
                            Ok(())
                        }),
                )
                .transition(
                    TransitionBuilder::new("archive")
                        .initial("pending")
                        .initial("shipped")
                        .to("archived"),
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn current_state_resolves_through_the_graph() {
        let mut order = Order::at("pending");
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        assert_eq!(machine.current_state().unwrap().name(), "pending");
    }

    #[test]
    fn current_state_fails_when_subject_and_graph_disagree() {
        let mut order = Order::at("limbo");
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let result = machine.current_state();
        assert!(matches!(result, Err(Error::UnknownState(_))));
    }

    #[test]
    fn current_state_fails_for_an_unset_subject() {
        let mut order = Order {
            status: None,
            paid: false,
            shipments: 0,
        };
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let result = machine.current_state();
        assert!(matches!(result, Err(Error::InvalidSubjectState(_))));
    }

    #[test]
    fn available_transitions_follow_the_current_state() {
        let mut order = Order::at("pending");
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let names: Vec<&str> = machine
            .available_transitions()
            .unwrap()
            .iter()
            .map(|t| t.id().name())
            .collect();
        assert_eq!(names, vec!["activate", "archive"]);
    }

    #[test]
    fn evaluate_fails_for_unknown_transitions() {
        let mut order = Order::at("pending");
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let result = machine.evaluate(&TransitionId::new("explode"));
        assert!(matches!(result, Err(Error::UnknownTransition(_))));
    }

    #[test]
    fn evaluate_is_positive_when_reachable_and_unguarded() {
        let mut order = Order::at("pending");
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let evaluation = machine.evaluate(&TransitionId::new("activate")).unwrap();
        assert!(evaluation.is_valid());
    }

    #[test]
    fn evaluate_reports_unreachable_transitions() {
        let mut order = Order::at("active");
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let evaluation = machine.evaluate(&TransitionId::new("activate")).unwrap();
        assert!(!evaluation.is_valid());
        assert!(!evaluation.is_reachable());
    }

    #[test]
    fn evaluate_runs_the_guard_only_when_reachable() {
        let mut order = Order::at("active");
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let evaluation = machine.evaluate(&TransitionId::new("ship")).unwrap();
        assert!(evaluation.is_reachable());
        assert!(!evaluation.guard_passed());
        assert!(!evaluation.is_valid());
    }

    #[test]
    fn evaluate_is_side_effect_free_and_idempotent() {
        let mut order = Order::at("active");
        let machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);
        let ship = TransitionId::new("ship");

        let first = machine.evaluate(&ship).unwrap();
        let second = machine.evaluate(&ship).unwrap();

        assert_eq!(first, second);
        assert_eq!(machine.current_state().unwrap().name(), "active");
        assert_eq!(machine.subject().shipments, 0);
    }

    #[test]
    fn apply_moves_the_subject_to_the_final_state() {
        let mut order = Order::at("pending");
        let mut machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        machine.apply(&TransitionId::new("activate")).unwrap();
        assert_eq!(machine.current_state().unwrap().name(), "active");
    }

    #[test]
    fn apply_is_strict_not_saturating() {
        let mut order = Order::at("pending");
        let mut machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);
        let activate = TransitionId::new("activate");

        machine.apply(&activate).unwrap();
        let second = machine.apply(&activate);

        match second {
            Err(Error::CannotTransition { evaluation }) => {
                assert!(!evaluation.is_reachable());
                assert_eq!(evaluation.current_state().name(), "active");
            }
            other => panic!("expected CannotTransition, got {other:?}"),
        }
        assert_eq!(machine.current_state().unwrap().name(), "active");
    }

    #[test]
    fn apply_refuses_when_the_guard_rejects() {
        let mut order = Order::at("active");
        let mut machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let result = machine.apply(&TransitionId::new("ship"));
        assert!(matches!(result, Err(Error::CannotTransition { .. })));
        assert_eq!(machine.current_state().unwrap().name(), "active");
        assert_eq!(machine.subject().shipments, 0);
    }

    #[test]
    fn apply_runs_the_side_effect_before_the_state_write() {
        let mut order = Order::at("active");
        order.paid = true;
        let mut machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        machine.apply(&TransitionId::new("ship")).unwrap();
        assert_eq!(machine.current_state().unwrap().name(), "shipped");
        assert_eq!(machine.subject().shipments, 1);
    }

    #[test]
    fn a_failing_side_effect_leaves_the_state_unwritten() {
        let graph = Arc::new(
            GraphBuilder::new("orders")
                .states(["pending", "active"])
                .transition(
                    TransitionBuilder::new("activate")
                        .initial("pending")
                        .to("active")
                        .effect(|_: &mut Order, _t| Err(Error::effect("ledger offline"))),
                )
                .build()
                .unwrap(),
        );

        let mut order = Order::at("pending");
        let mut machine = ConcreteStateMachine::new(mediator(), graph, &mut order);

        let result = machine.apply(&TransitionId::new("activate"));
        assert!(matches!(result, Err(Error::Effect(_))));
        assert_eq!(machine.current_state().unwrap().name(), "pending");
        assert!(machine.log().is_empty());
    }

    #[test]
    fn the_log_records_each_applied_transition() {
        let mut order = Order::at("pending");
        order.paid = true;
        let mut machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        machine.apply(&TransitionId::new("activate")).unwrap();
        machine.apply(&TransitionId::new("ship")).unwrap();
        machine.apply(&TransitionId::new("archive")).unwrap();

        let path: Vec<&str> = machine.log().path().iter().map(|s| s.name()).collect();
        assert_eq!(path, vec!["pending", "active", "shipped", "archived"]);
    }

    #[test]
    fn a_failed_apply_leaves_the_log_unchanged() {
        let mut order = Order::at("pending");
        let mut machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);

        let _ = machine.apply(&TransitionId::new("ship"));
        assert!(machine.log().is_empty());
    }

    #[test]
    fn the_subject_stays_with_the_caller() {
        let mut order = Order::at("pending");
        {
            let mut machine = ConcreteStateMachine::new(mediator(), graph(), &mut order);
            machine.apply(&TransitionId::new("activate")).unwrap();
        }
        assert_eq!(order.status.as_deref(), Some("active"));
    }
}
