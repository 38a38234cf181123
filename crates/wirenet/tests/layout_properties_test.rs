//! Integration tests for the public layout API.
//!
//! Covers the documented end-to-end scenarios and property checks over
//! randomly generated networks.

use wirenet::{
    LayoutBuilder, LayoutEngine, Network, PositionMap, Segment,
    geometry::{Point, Size},
    identifier::NodeId,
    layout::scoring::count_segment_node_overlaps,
};

fn network(nodes: &[&str], segments: &[(&str, &str, &str)]) -> Network {
    let mut network = Network::new();
    for id in nodes {
        network.add_node(*id);
    }
    for (id, node_a, node_b) in segments {
        network.add_segment(Segment::new(*id, *node_a, *node_b));
    }
    network
}

#[test]
fn test_three_nodes_snap_to_grid() {
    let engine = LayoutBuilder::default()
        .with_snap_to_grid(true)
        .with_grid_step(20.0)
        .with_viewport(Size::new(800.0, 520.0))
        .build()
        .unwrap();
    let network = network(&["A", "B", "C"], &[("S1", "A", "B")]);

    let positions = engine.layout(&network);
    assert_eq!(positions.len(), 3);

    let points: Vec<Point> = positions.values().copied().collect();
    for (idx, point) in points.iter().enumerate() {
        assert!(!points[idx + 1..].contains(point), "duplicate position {point:?}");
        assert!(engine.options().placement_bounds().contains(*point));
        assert_eq!(point.x() % 20.0, 0.0);
        assert_eq!(point.y() % 20.0, 0.0);
    }
}

#[test]
fn test_four_cycle_is_crossing_free_after_refinement() {
    let engine = LayoutBuilder::default().build().unwrap();
    let network = network(
        &["A", "B", "C", "D"],
        &[("S1", "A", "B"), ("S2", "B", "C"), ("S3", "C", "D"), ("S4", "D", "A")],
    );

    let positions = engine.layout(&network);
    let refined = engine.refine(&network, &positions);
    assert_eq!(engine.check(&network, &refined).crossings(), 0);
}

#[test]
fn test_node_on_segment_midpoint_is_an_overlap() {
    let positions: PositionMap = [
        (NodeId::new("X"), Point::new(150.0, 100.0)),
        (NodeId::new("Y"), Point::new(100.0, 100.0)),
        (NodeId::new("Z"), Point::new(200.0, 100.0)),
    ]
    .into_iter()
    .collect();

    let segments = vec![Segment::new("S1", "Y", "Z")];
    assert!(count_segment_node_overlaps(&segments, &positions) >= 1);
}

#[test]
fn test_layout_does_not_depend_on_declaration_order() {
    let engine = LayoutBuilder::default().build().unwrap();
    let forward = network(
        &["A", "B", "C", "D"],
        &[("S1", "A", "B"), ("S2", "B", "C"), ("S3", "C", "D")],
    );
    let reversed = network(
        &["D", "C", "B", "A"],
        &[("S3", "C", "D"), ("S2", "B", "C"), ("S1", "A", "B")],
    );

    assert_eq!(engine.layout(&forward), engine.layout(&reversed));
}

#[test]
fn test_empty_network_yields_empty_map() {
    let engine = LayoutBuilder::default().build().unwrap();
    assert!(engine.layout(&Network::new()).is_empty());
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Networks of up to 8 nodes with up to 10 segments, self-loops included.
    fn network_strategy() -> impl Strategy<Value = Network> {
        (1usize..=8).prop_flat_map(|node_count| {
            prop::collection::vec((0..node_count, 0..node_count), 0..=10).prop_map(
                move |pairs| {
                    let mut network = Network::new();
                    for idx in 0..node_count {
                        network.add_node(format!("N{idx}"));
                    }
                    for (idx, (a, b)) in pairs.into_iter().enumerate() {
                        network.add_segment(Segment::new(
                            format!("S{idx}"),
                            format!("N{a}"),
                            format!("N{b}"),
                        ));
                    }
                    network
                },
            )
        })
    }

    fn engine_strategy() -> impl Strategy<Value = LayoutEngine> {
        (any::<bool>(), prop_oneof![Just(10.0), Just(20.0), Just(25.0)]).prop_map(
            |(snap, step)| {
                LayoutBuilder::default()
                    .with_snap_to_grid(snap)
                    .with_grid_step(step)
                    .build()
                    .unwrap()
            },
        )
    }

    /// Arbitrary placements inside the default viewport for the nodes of `network`.
    fn placement_for(network: Network) -> impl Strategy<Value = (Network, PositionMap)> {
        let nodes = network.node_list();
        prop::collection::vec((20.0f64..=780.0, 20.0f64..=500.0), nodes.len()).prop_map(
            move |coords| {
                let positions = nodes
                    .iter()
                    .cloned()
                    .zip(coords)
                    .map(|(id, (x, y))| (id, Point::new(x.round(), y.round())))
                    .collect();
                (network.clone(), positions)
            },
        )
    }

    // ===================
    // Property Checks
    // ===================

    /// Every node is placed exactly once, inside the placement bounds.
    fn check_layout_is_total_and_contained(
        engine: &LayoutEngine,
        network: &Network,
    ) -> Result<(), TestCaseError> {
        let positions = engine.layout(network);
        let bounds = engine.options().placement_bounds();

        prop_assert_eq!(positions.len(), network.node_count());
        for node in network.nodes() {
            let point = positions.get(node);
            prop_assert!(point.is_some(), "node {} was not placed", node);
            if let Some(point) = point {
                prop_assert!(point.x().is_finite() && point.y().is_finite());
                prop_assert!(bounds.contains(*point), "{:?} outside {:?}", point, bounds);
            }
        }
        Ok(())
    }

    /// Identical inputs produce identical positions.
    fn check_layout_is_deterministic(
        engine: &LayoutEngine,
        network: &Network,
    ) -> Result<(), TestCaseError> {
        prop_assert_eq!(engine.layout(network), engine.layout(network));
        Ok(())
    }

    /// Refinement never returns a placement ranked worse than its input.
    fn check_refine_never_worsens(
        network: &Network,
        positions: &PositionMap,
    ) -> Result<(), TestCaseError> {
        let engine = LayoutBuilder::default().build().unwrap();
        let before = engine.check(network, positions);
        let refined = engine.refine(network, positions);
        let after = engine.check(network, &refined);

        prop_assert!(after <= before, "{:?} is worse than {:?}", after, before);
        prop_assert_eq!(refined.len(), positions.len());
        Ok(())
    }

    /// A placement without conflicts is returned unchanged.
    fn check_clean_placement_is_fixed_point(
        engine: &LayoutEngine,
        network: &Network,
    ) -> Result<(), TestCaseError> {
        let positions = engine.layout(network);
        if engine.check(network, &positions).is_clean() {
            prop_assert_eq!(engine.refine(network, &positions), positions);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn layout_is_total_and_contained(
            engine in engine_strategy(),
            network in network_strategy(),
        ) {
            check_layout_is_total_and_contained(&engine, &network)?;
        }

        #[test]
        fn layout_is_deterministic(
            engine in engine_strategy(),
            network in network_strategy(),
        ) {
            check_layout_is_deterministic(&engine, &network)?;
        }

        #[test]
        fn refine_never_worsens(
            (network, positions) in network_strategy().prop_flat_map(placement_for),
        ) {
            check_refine_never_worsens(&network, &positions)?;
        }

        #[test]
        fn clean_placement_is_fixed_point(
            engine in engine_strategy(),
            network in network_strategy(),
        ) {
            check_clean_placement_is_fixed_point(&engine, &network)?;
        }
    }
}
