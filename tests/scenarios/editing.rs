use euclid::default::Point2D;
use graphwalk::{ClickOutcome, GraphIntent, PointerButton};

use super::harness::TestHarness;

#[test]
fn full_link_on_three_selected_nodes_yields_triangle() {
    let mut harness = TestHarness::with_nodes(8);
    for key in [5, 6, 7] {
        assert!(harness.session.toggle_selection(key));
    }

    harness.session.full_link_selected();

    let graph = harness.session.graph();
    assert_eq!(graph.edge_count(), 3);
    assert!(graph.has_edge(5, 6));
    assert!(graph.has_edge(6, 7));
    assert!(graph.has_edge(5, 7));
}

#[test]
fn full_link_is_independent_of_selection_order() {
    let mut forward = TestHarness::with_nodes(8);
    let mut backward = TestHarness::with_nodes(8);
    for key in [5, 6, 7] {
        forward.session.toggle_selection(key);
    }
    for key in [7, 6, 5] {
        backward.session.toggle_selection(key);
    }

    forward.session.full_link_selected();
    backward.session.full_link_selected();

    assert_eq!(forward.session.graph(), backward.session.graph());
}

#[test]
fn two_click_edge_drawing_toggles_edge() {
    let mut harness = TestHarness::with_nodes(2);
    let (ax, ay) = TestHarness::grid_point(0);
    let (bx, by) = TestHarness::grid_point(1);

    harness.session.apply_intents([
        GraphIntent::Click {
            point: Point2D::new(ax, ay),
            button: PointerButton::Primary,
        },
        GraphIntent::Click {
            point: Point2D::new(bx, by),
            button: PointerButton::Primary,
        },
        GraphIntent::ToggleEdgeBetweenSelected,
    ]);
    assert!(harness.session.graph().has_edge(0, 1));
    assert!(harness.session.selection().is_empty());

    assert_eq!(
        harness.session.click(Point2D::new(ax, ay), PointerButton::Secondary),
        ClickOutcome::Removed(0)
    );
    assert_eq!(harness.session.graph().edge_count(), 0);
}

#[test]
fn random_link_respects_degree_cap_for_every_selected_node() {
    let mut harness = TestHarness::with_nodes(10);
    let keys: Vec<_> = harness.session.graph().nodes().collect();
    for &key in &keys {
        harness.session.toggle_selection(key);
    }

    harness.session.random_link_selected();

    let graph = harness.session.graph();
    assert!(graph.edge_count() > 0);
    for key in keys {
        assert!(graph.degree(key).unwrap() <= 3);
    }
}

#[test]
fn generated_graph_nodes_all_have_edges() {
    let mut harness = TestHarness::new();
    harness
        .session
        .apply_intents([GraphIntent::GenerateGraph { node_count: Some(12) }]);

    let graph = harness.session.graph();
    for key in graph.nodes() {
        assert!(graph.degree(key).unwrap() >= 1);
    }
}
