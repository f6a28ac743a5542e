/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Breadth-first and depth-first traversal producing a visitation order and a
//! parent map.
//!
//! Neighbors are expanded in ascending id order (the iteration order of
//! [`Graph::neighbors`]), so both traversals are deterministic.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::warn;

use crate::graph::{EdgeKey, Graph, NodeKey};

/// Which traversal to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalKind {
    Bfs,
    Dfs,
}

impl TraversalKind {
    pub fn run(self, graph: &Graph, start: NodeKey) -> Traversal {
        match self {
            TraversalKind::Bfs => bfs(graph, start),
            TraversalKind::Dfs => dfs(graph, start),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TraversalKind::Bfs => "bfs",
            TraversalKind::Dfs => "dfs",
        }
    }
}

/// Visitation order plus the node that discovered each visited node.
///
/// `parents` has exactly the keys of `order`; the start maps to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    pub order: Vec<NodeKey>,
    pub parents: BTreeMap<NodeKey, Option<NodeKey>>,
}

impl Traversal {
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn start(&self) -> Option<NodeKey> {
        self.order.first().copied()
    }

    /// Discoverer of `key`. `None` for the start or an unvisited node.
    pub fn parent_of(&self, key: NodeKey) -> Option<NodeKey> {
        self.parents.get(&key).copied().flatten()
    }

    /// Parent edges in visitation order.
    pub fn tree_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.order
            .iter()
            .filter_map(|&key| EdgeKey::new(self.parent_of(key)?, key))
    }

    fn rooted_at(start: NodeKey) -> Self {
        Self {
            order: vec![start],
            parents: BTreeMap::from([(start, None)]),
        }
    }

    fn visit(&mut self, key: NodeKey, parent: NodeKey) {
        self.order.push(key);
        self.parents.insert(key, Some(parent));
    }
}

/// Queue-based breadth-first traversal from `start`.
///
/// Empty result if `start` is not in the graph.
pub fn bfs(graph: &Graph, start: NodeKey) -> Traversal {
    if !graph.has_node(start) {
        warn!("bfs: start node {start} does not exist");
        return Traversal::default();
    }

    let mut traversal = Traversal::rooted_at(start);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let Some(adjacent) = graph.neighbors(current) else {
            continue;
        };
        for &next in adjacent {
            if !traversal.parents.contains_key(&next) {
                traversal.visit(next, current);
                queue.push_back(next);
            }
        }
    }
    traversal
}

/// Depth-first traversal from `start`.
///
/// Visits in the same order as the recursive formulation (enter a node, then
/// descend into each unvisited neighbor in turn) using an explicit stack, so
/// long paths cannot overflow the call stack.
pub fn dfs(graph: &Graph, start: NodeKey) -> Traversal {
    if !graph.has_node(start) {
        warn!("dfs: start node {start} does not exist");
        return Traversal::default();
    }

    let mut traversal = Traversal::rooted_at(start);
    let mut visited = BTreeSet::from([start]);
    let mut stack = vec![(start, pending_neighbors(graph, start))];
    while let Some((current, pending)) = stack.last_mut() {
        let current = *current;
        let Some(next) = pending.pop_front() else {
            stack.pop();
            continue;
        };
        if visited.insert(next) {
            traversal.visit(next, current);
            stack.push((next, pending_neighbors(graph, next)));
        }
    }
    traversal
}

fn pending_neighbors(graph: &Graph, key: NodeKey) -> VecDeque<NodeKey> {
    graph
        .neighbors(key)
        .map(|adjacent| adjacent.iter().copied().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn graph_from_edges(node_count: usize, edges: &[(NodeKey, NodeKey)]) -> Graph {
        let mut graph = Graph::new();
        for key in 0..node_count {
            graph.add_node(key);
        }
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    #[test]
    fn test_bfs_path() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2)]);
        let traversal = bfs(&graph, 0);

        assert_eq!(traversal.order, vec![0, 1, 2]);
        assert_eq!(
            traversal.parents,
            BTreeMap::from([(0, None), (1, Some(0)), (2, Some(1))])
        );
    }

    #[test]
    fn test_bfs_visits_by_level() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (0, 3)]);
        let traversal = bfs(&graph, 0);

        assert_eq!(traversal.order, vec![0, 1, 3, 2]);
        assert_eq!(traversal.parent_of(2), Some(1));
        assert_eq!(traversal.parent_of(3), Some(0));
    }

    #[test]
    fn test_dfs_descends_before_siblings() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (0, 3)]);
        let traversal = dfs(&graph, 0);

        assert_eq!(traversal.order, vec![0, 1, 2, 3]);
        assert_eq!(traversal.parent_of(2), Some(1));
        assert_eq!(traversal.parent_of(3), Some(0));
    }

    #[test]
    fn test_dfs_parent_is_immediate_caller() {
        // Triangle 0-1-2: dfs reaches 2 through 1, not directly from 0.
        let graph = graph_from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let traversal = dfs(&graph, 0);

        assert_eq!(traversal.order, vec![0, 1, 2]);
        assert_eq!(traversal.parent_of(2), Some(1));

        let traversal = bfs(&graph, 0);
        assert_eq!(traversal.parent_of(2), Some(0));
    }

    #[rstest]
    #[case(TraversalKind::Bfs)]
    #[case(TraversalKind::Dfs)]
    fn test_missing_start_is_empty(#[case] kind: TraversalKind) {
        let graph = graph_from_edges(2, &[(0, 1)]);
        let traversal = kind.run(&graph, 5);

        assert!(traversal.is_empty());
        assert!(traversal.parents.is_empty());
        assert_eq!(traversal.start(), None);
    }

    #[rstest]
    #[case(TraversalKind::Bfs)]
    #[case(TraversalKind::Dfs)]
    fn test_stays_in_component(#[case] kind: TraversalKind) {
        let graph = graph_from_edges(5, &[(0, 1), (2, 3), (3, 4)]);
        let traversal = kind.run(&graph, 3);

        let mut visited = traversal.order.clone();
        visited.sort_unstable();
        assert_eq!(visited, vec![2, 3, 4]);
    }

    #[test]
    fn test_isolated_start() {
        let graph = graph_from_edges(2, &[]);
        let traversal = dfs(&graph, 1);

        assert_eq!(traversal.order, vec![1]);
        assert_eq!(traversal.parent_of(1), None);
        assert_eq!(traversal.tree_edges().count(), 0);
    }

    #[test]
    fn test_tree_edges_follow_order() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (0, 3)]);
        let edges: Vec<_> = bfs(&graph, 0).tree_edges().map(|edge| edge.endpoints()).collect();
        assert_eq!(edges, vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    fn test_dfs_long_path_does_not_recurse() {
        let edges: Vec<_> = (0..20_000).map(|key| (key, key + 1)).collect();
        let graph = graph_from_edges(20_001, &edges);
        let traversal = dfs(&graph, 0);

        assert_eq!(traversal.len(), 20_001);
        assert_eq!(traversal.parent_of(20_000), Some(19_999));
    }

    fn reachable(graph: &Graph, start: NodeKey) -> BTreeSet<NodeKey> {
        let mut seen = BTreeSet::from([start]);
        let mut frontier = vec![start];
        while let Some(key) = frontier.pop() {
            for &next in graph.neighbors(key).into_iter().flatten() {
                if seen.insert(next) {
                    frontier.push(next);
                }
            }
        }
        seen
    }

    proptest! {
        #[test]
        fn proptest_traversals_cover_component_with_parent_tree(
            pairs in prop::collection::vec((0_usize..15, 0_usize..15), 0..40),
            start in 0_usize..15,
            depth_first in any::<bool>(),
        ) {
            let graph = graph_from_edges(15, &pairs);
            let kind = if depth_first { TraversalKind::Dfs } else { TraversalKind::Bfs };
            let traversal = kind.run(&graph, start);

            let visited: BTreeSet<NodeKey> = traversal.order.iter().copied().collect();
            prop_assert_eq!(visited.len(), traversal.order.len());
            prop_assert_eq!(&visited, &reachable(&graph, start));
            prop_assert_eq!(traversal.parents.len(), traversal.order.len());
            prop_assert_eq!(traversal.parents.get(&start), Some(&None));

            for (position, &key) in traversal.order.iter().enumerate().skip(1) {
                let parent = traversal.parent_of(key);
                prop_assert!(parent.is_some());
                let parent = parent.unwrap_or(key);
                prop_assert!(graph.has_edge(parent, key));
                // Parents are visited earlier, so following them reaches the root.
                let parent_position = traversal.order.iter().position(|&other| other == parent);
                prop_assert!(parent_position.is_some_and(|index| index < position));
            }
        }
    }
}
