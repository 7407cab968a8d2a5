//! Property-based tests for validation and the coefficient wire format.

use proptest::prelude::*;
use quack_ir::{Graph, IrError, IsingModel, IsingModelBuilder, validate};

/// Random graph whose edges may point outside the vertex range or loop.
fn arb_graph() -> impl Strategy<Value = Graph> {
    (1_u32..=8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n + 2, 0..n + 2), 0..=12),
        )
            .prop_map(|(n, edges)| Graph::new(n, edges))
    })
}

/// Random model with canonical, non-repeating couplings.
fn arb_model() -> impl Strategy<Value = IsingModel> {
    (2_u32..=10).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::btree_map(0..n, -5.0_f64..5.0, 0..n as usize),
            prop::collection::btree_map((0..n, 0..n), -5.0_f64..5.0, 0..=12),
        )
            .prop_map(|(n, fields, couplings)| {
                let mut b = IsingModelBuilder::new(n);
                for (s, h) in fields {
                    b.set_field(s, h).unwrap();
                }
                for ((a, c), j) in couplings {
                    if a != c {
                        // (a, c) and (c, a) may both be drawn; accumulate those.
                        b.add_interaction(a, c, j).unwrap();
                    }
                }
                b.build()
            })
    })
}

proptest! {
    #[test]
    fn validate_accepts_iff_edges_in_range_and_loop_free(graph in arb_graph()) {
        let n = graph.vertex_count();
        let well_formed = graph
            .edges()
            .iter()
            .all(|&(a, b)| a < n && b < n && a != b);
        let result = validate(&graph);
        prop_assert_eq!(result.is_ok(), well_formed);
        if let Err(e) = result {
            prop_assert!(e.is_structural());
        }
    }

    #[test]
    fn coefficient_wire_format_roundtrips(model in arb_model()) {
        let json = model.to_json().unwrap();
        let back = IsingModel::from_json(&json).unwrap();
        prop_assert_eq!(back.num_spins(), model.num_spins());
        prop_assert_eq!(back.sorted_fields(), model.sorted_fields());
        prop_assert_eq!(back.sorted_interactions(), model.sorted_interactions());
        prop_assert_eq!(back.to_json().unwrap(), json);
    }
}

#[test]
fn structural_errors_name_the_offender() {
    let err = validate(&Graph::new(4, [(0, 1), (4, 1)])).unwrap_err();
    assert!(matches!(err, IrError::InvalidEdgeEndpoint { edge: (4, 1), vertex_count: 4 }));
    assert!(err.to_string().contains("(4, 1)"));
}
