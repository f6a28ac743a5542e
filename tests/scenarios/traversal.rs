use std::collections::BTreeMap;

use super::harness::TestHarness;

#[test]
fn bfs_on_path_visits_in_order_with_chain_parents() {
    let mut harness = TestHarness::with_nodes(3);
    harness.link(&[(0, 1), (1, 2)]);

    let traversal = harness.session.bfs(Some(0));

    assert_eq!(traversal.order, vec![0, 1, 2]);
    assert_eq!(
        traversal.parents,
        BTreeMap::from([(0, None), (1, Some(0)), (2, Some(1))])
    );
}

#[test]
fn dfs_on_path_matches_bfs() {
    let mut harness = TestHarness::with_nodes(3);
    harness.link(&[(0, 1), (1, 2)]);

    let traversal = harness.session.dfs(Some(0));

    assert_eq!(traversal.order, vec![0, 1, 2]);
    assert_eq!(
        traversal.parents,
        BTreeMap::from([(0, None), (1, Some(0)), (2, Some(1))])
    );
}

#[test]
fn bfs_with_branch_reaches_all_four_nodes() {
    let mut harness = TestHarness::with_nodes(4);
    harness.link(&[(0, 1), (1, 2), (0, 3)]);

    let traversal = harness.session.bfs(Some(0));

    assert_eq!(traversal.len(), 4);
    assert!(traversal.order == vec![0, 1, 3, 2] || traversal.order == vec![0, 3, 1, 2]);
    assert_eq!(traversal.parent_of(2), Some(1));
}

#[test]
fn deleting_branch_node_cuts_component() {
    let mut harness = TestHarness::with_nodes(4);
    harness.link(&[(0, 1), (1, 2), (0, 3)]);

    assert!(harness.session.remove_node(1));

    assert!(!harness.session.graph().has_edge(0, 1));
    assert!(!harness.session.graph().has_edge(1, 2));
    let mut visited = harness.session.bfs(Some(0)).order;
    visited.sort_unstable();
    assert_eq!(visited, vec![0, 3]);
}

#[test]
fn traversal_from_missing_node_is_empty() {
    let harness = TestHarness::with_nodes(2);

    assert!(harness.session.bfs(Some(9)).is_empty());
    assert!(harness.session.dfs(Some(9)).is_empty());
}
