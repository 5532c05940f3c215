//! Macros for declaring graph topologies.

/// Declare a graph's states and transitions in one block.
///
/// Expands to a [`GraphBuilder`](crate::GraphBuilder) chain and yields
/// `Result<Graph<S>, BuildError>`; the subject type is taken from context.
/// Guards and side effects are attached through the builder API, not the
/// macro.
///
/// # Example
///
/// ```rust
/// use stateward::{graph, Graph};
///
/// struct Order;
///
/// let orders: Graph<Order> = graph! {
///     "orders";
///     states: [pending, active, archived];
///     transitions: {
///         activate: [pending] => active,
///         archive: [pending, active] => archived,
///     }
/// }
/// .unwrap();
///
/// assert_eq!(orders.states().len(), 3);
/// assert_eq!(orders.transitions().len(), 2);
/// ```
#[macro_export]
macro_rules! graph {
    (
        $id:expr;
        states: [ $($state:ident),+ $(,)? ];
        transitions: {
            $( $transition:ident : [ $($from:ident),+ $(,)? ] => $to:ident ),* $(,)?
        } $(;)?
    ) => {{
        let mut builder = $crate::GraphBuilder::new($id);
        $(
            builder = builder.state(stringify!($state));
        )+
        $(
            builder = builder.transition(
                $crate::TransitionBuilder::new(stringify!($transition))
                    $( .initial(stringify!($from)) )+
                    .to(stringify!($to)),
            );
        )*
        builder.build()
    }};
}

#[cfg(test)]
mod tests {
    use crate::builder::{BuildError, GraphBuilder, TransitionBuilder};
    use crate::core::state::StateId;
    use crate::graph::Graph;

    #[test]
    fn macro_matches_the_equivalent_builder_graph() {
        let declared: Graph<()> = graph! {
            "orders";
            states: [pending, active, archived];
            transitions: {
                activate: [pending] => active,
                archive: [pending, active] => archived,
            }
        }
        .unwrap();

        let built: Graph<()> = GraphBuilder::new("orders")
            .states(["pending", "active", "archived"])
            .transition(TransitionBuilder::new("activate").initial("pending").to("active"))
            .transition(
                TransitionBuilder::new("archive")
                    .initial("pending")
                    .initial("active")
                    .to("archived"),
            )
            .build()
            .unwrap();

        assert_eq!(declared.id(), built.id());
        assert_eq!(declared.states(), built.states());
        assert_eq!(declared.transitions(), built.transitions());
    }

    #[test]
    fn macro_output_is_validated() {
        let result: Result<Graph<()>, BuildError> = graph! {
            "orders";
            states: [pending];
            transitions: {
                activate: [pending] => active,
            }
        };

        assert!(matches!(result, Err(BuildError::UnknownState { .. })));
    }

    #[test]
    fn macro_preserves_initial_state_order() {
        let graph: Graph<()> = graph! {
            "orders";
            states: [pending, active, archived];
            transitions: {
                archive: [active, pending] => archived,
            }
        }
        .unwrap();

        let transition = graph
            .transition(&crate::core::transition::TransitionId::new("archive"))
            .unwrap();
        let names: Vec<&str> = transition.initial_states().iter().map(StateId::name).collect();
        assert_eq!(names, vec!["active", "pending"]);
    }

    #[test]
    fn macro_allows_empty_transition_block() {
        let graph: Graph<()> = graph! {
            "static";
            states: [only];
            transitions: {}
        }
        .unwrap();

        assert!(graph.transitions().is_empty());
    }
}
