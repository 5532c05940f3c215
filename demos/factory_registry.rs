//! Routes subjects to the right machine assembly through a factory chain.
//!
//! Two kinds of ticket share one subject type but follow different graphs:
//! the chain picks a factory by predicate, in registration order, and
//! refuses anything nobody claims.
//!
//! Run with: `RUST_LOG=debug cargo run --example factory_registry`

use stateward::{
    graph, ConcreteStateMachineFactory, FactoryChain, FixedMediatorFactory, FnMediator, Graph,
    GraphId, StateMachine, StateMachineFactory, StaticGraphLoader, TransitionId,
};
use std::sync::Arc;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Severity {
    Normal,
    Urgent,
}

struct Ticket {
    severity: Severity,
    status: Option<String>,
}

fn ticket_mediator() -> FnMediator<Ticket> {
    FnMediator::new(
        |ticket: &Ticket| ticket.status.clone(),
        |ticket: &mut Ticket, state| ticket.status = Some(state.to_string()),
    )
}

fn factory_for(
    severity: Severity,
    graph: Graph<Ticket>,
) -> ConcreteStateMachineFactory<Ticket> {
    ConcreteStateMachineFactory::new(
        Arc::new(FixedMediatorFactory::new(ticket_mediator())),
        Arc::new(StaticGraphLoader::new().with(graph)),
        move |ticket: &Ticket| ticket.severity == severity,
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Normal tickets go through triage; urgent ones skip straight to work.
    let normal: Graph<Ticket> = graph! {
        "tickets";
        states: [open, triaged, in_progress, closed];
        transitions: {
            triage: [open] => triaged,
            start: [triaged] => in_progress,
            close: [triaged, in_progress] => closed,
        }
    }?;
    let urgent: Graph<Ticket> = graph! {
        "tickets";
        states: [open, in_progress, closed];
        transitions: {
            start: [open] => in_progress,
            close: [in_progress] => closed,
        }
    }?;

    let chain = FactoryChain::new()
        .push(factory_for(Severity::Urgent, urgent))
        .push(factory_for(Severity::Normal, normal));

    let tickets_graph = GraphId::new("tickets");

    let mut urgent_ticket = Ticket {
        severity: Severity::Urgent,
        status: Some("open".to_string()),
    };
    let mut machine = chain.make(&mut urgent_ticket, &tickets_graph)?;
    machine.apply(&TransitionId::new("start"))?;
    println!(
        "urgent ticket is now '{}'",
        machine.current_state()?.name()
    );

    let mut normal_ticket = Ticket {
        severity: Severity::Normal,
        status: Some("open".to_string()),
    };
    let mut machine = chain.make(&mut normal_ticket, &tickets_graph)?;
    // A normal ticket cannot skip triage.
    let evaluation = machine.evaluate(&TransitionId::new("start"))?;
    println!("start before triage: {}", evaluation.summary());
    machine.apply(&TransitionId::new("triage"))?;
    machine.apply(&TransitionId::new("start"))?;
    println!(
        "normal ticket is now '{}'",
        machine.current_state()?.name()
    );

    Ok(())
}
