//! Walks an order through its lifecycle, showing evaluation before
//! application and the audit log afterwards.
//!
//! Run with: `RUST_LOG=debug cargo run --example order_workflow`

use stateward::{
    ConcreteStateMachine, FnMediator, Graph, GraphBuilder, StateMachine, StateMediator,
    TransitionBuilder, TransitionId,
};
use std::sync::Arc;

struct Order {
    status: Option<String>,
    paid: bool,
    confirmations_sent: u32,
}

fn order_graph() -> Result<Graph<Order>, stateward::BuildError> {
    GraphBuilder::new("orders")
        .states(["pending", "confirmed", "shipped", "archived"])
        .transition(
            TransitionBuilder::new("confirm")
                .initial("pending")
                .to("confirmed")
                .when(|order: &Order, _t| order.paid)
                .effect(|order: &mut Order, _t| {
                    order.confirmations_sent += 1;
                    Ok(())
                }),
        )
        .transition(TransitionBuilder::new("ship").initial("confirmed").to("shipped"))
        .transition(
            TransitionBuilder::new("archive")
                .initial("pending")
                .initial("shipped")
                .to("archived"),
        )
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let graph = Arc::new(order_graph()?);
    let mediator: Arc<dyn StateMediator<Order>> = Arc::new(FnMediator::new(
        |order: &Order| order.status.clone(),
        |order: &mut Order, state| order.status = Some(state.to_string()),
    ));

    let mut order = Order {
        status: Some("pending".to_string()),
        paid: false,
        confirmations_sent: 0,
    };

    let confirm = TransitionId::new("confirm");

    {
        let mut machine =
            ConcreteStateMachine::new(mediator.clone(), graph.clone(), &mut order);

        println!(
            "available from '{}': {:?}",
            machine.current_state()?.name(),
            machine
                .available_transitions()?
                .iter()
                .map(|t| t.id().name())
                .collect::<Vec<_>>()
        );

        // Unpaid: the guard blocks confirmation, and the evaluation says why.
        let evaluation = machine.evaluate(&confirm)?;
        println!("confirm while unpaid: {}", evaluation.summary());

        let error = machine.apply(&confirm).unwrap_err();
        println!("apply while unpaid fails: {error}");
    }

    // The caller settles the payment; a fresh machine picks up from there.
    order.paid = true;
    let mut machine = ConcreteStateMachine::new(mediator, graph, &mut order);

    machine.apply(&confirm)?;
    machine.apply(&TransitionId::new("ship"))?;
    machine.apply(&TransitionId::new("archive"))?;

    println!(
        "final state: {}, confirmations sent: {}",
        machine.current_state()?.name(),
        machine.subject().confirmations_sent
    );
    println!(
        "journey: {:?}",
        machine.log().path().iter().map(|s| s.name()).collect::<Vec<_>>()
    );

    Ok(())
}
