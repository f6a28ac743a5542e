/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Edge construction over a node subset.
//!
//! Two policies: complete linking, and degree-bounded random linking that
//! refuses any edge whose drawn segment would pass over an uninvolved node.
//! The random policy shuffles candidates and greedily accepts the first
//! eligible ones. It yields a visually clean graph, not a uniformly random
//! one.

use std::collections::BTreeSet;

use euclid::default::Point2D;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::canvas::{Canvas, CanvasPoint, manhattan};
use crate::config::LinkConfig;
use crate::graph::{Graph, NodeKey};

#[derive(Debug, Clone, Default)]
pub struct LinkEngine {
    config: LinkConfig,
    auto_link: bool,
}

impl LinkEngine {
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            auto_link: false,
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Whether new nodes are linked to their predecessor on creation.
    pub fn auto_link(&self) -> bool {
        self.auto_link
    }

    /// Flip auto-link mode and return the new value.
    pub fn toggle_auto_link(&mut self) -> bool {
        self.auto_link = !self.auto_link;
        self.auto_link
    }

    /// Link a freshly created node to the closest lower id, if auto-link is on.
    /// Returns the predecessor that was linked.
    pub fn link_new_node(&self, graph: &mut Graph, key: NodeKey) -> Option<NodeKey> {
        if !self.auto_link {
            return None;
        }
        let predecessor = graph.nodes().take_while(|&other| other < key).last()?;
        graph.add_edge(predecessor, key).then_some(predecessor)
    }

    /// Remove every edge with at least one endpoint in `nodes`.
    pub fn clear_edges_from(graph: &mut Graph, nodes: &[NodeKey]) {
        for &key in nodes {
            let Some(adjacent) = graph.neighbors(key) else {
                continue;
            };
            let adjacent: Vec<NodeKey> = adjacent.iter().copied().collect();
            for other in adjacent {
                graph.remove_edge(key, other);
            }
        }
    }

    /// Replace the edges touching `nodes` with the complete graph on `nodes`.
    ///
    /// Missing and duplicate entries are ignored. No-op below two nodes.
    pub fn full_link(graph: &mut Graph, nodes: &[NodeKey]) {
        let nodes = distinct_existing(graph, nodes);
        if nodes.len() < 2 {
            return;
        }
        Self::clear_edges_from(graph, &nodes);
        for (index, &a) in nodes.iter().enumerate() {
            for &b in nodes.iter().skip(index + 1) {
                graph.add_edge(a, b);
            }
        }
        debug!(
            "full link: {} nodes, {} edges",
            nodes.len(),
            nodes.len() * (nodes.len() - 1) / 2
        );
    }

    /// Replace the edges touching `nodes` with a random, degree-bounded,
    /// occlusion-free edge set.
    ///
    /// Nodes are processed in input order. For each, candidates from `nodes`
    /// are shuffled and accepted while the node is below `max_degree`. A
    /// candidate must not already be adjacent, must itself be below
    /// `max_degree`, and its segment must clear every third placed node.
    /// Nodes without a position never receive edges. No-op below two nodes.
    pub fn random_link<R: Rng + ?Sized>(
        &self,
        graph: &mut Graph,
        canvas: &Canvas,
        nodes: &[NodeKey],
        rng: &mut R,
    ) {
        let nodes = distinct_existing(graph, nodes);
        if nodes.len() < 2 {
            return;
        }
        Self::clear_edges_from(graph, &nodes);

        let max_degree = self.config.max_degree;
        let mut added = 0_usize;
        for &node in &nodes {
            if graph.degree(node).unwrap_or(max_degree) >= max_degree {
                continue;
            }
            let mut candidates: Vec<NodeKey> = nodes
                .iter()
                .copied()
                .filter(|&other| other != node && !graph.has_edge(node, other))
                .collect();
            candidates.shuffle(rng);

            for other in candidates {
                if graph.degree(node).unwrap_or(max_degree) >= max_degree {
                    break;
                }
                if graph.degree(other).unwrap_or(max_degree) >= max_degree {
                    continue;
                }
                if !self.segment_is_clear(canvas, node, other) {
                    continue;
                }
                if graph.add_edge(node, other) {
                    added += 1;
                }
            }
        }
        debug!("random link: {} nodes, {} edges", nodes.len(), added);
    }

    /// Whether the straight segment between `a` and `b` keeps
    /// `clearance_radius` from every other placed node.
    ///
    /// Samples `segment_samples + 1` evenly spaced points, endpoints
    /// included. Unplaced endpoints are never clear.
    pub fn segment_is_clear(&self, canvas: &Canvas, a: NodeKey, b: NodeKey) -> bool {
        let (Some(start), Some(end)) = (canvas.position(a), canvas.position(b)) else {
            return false;
        };
        let steps = self.config.segment_samples.max(1);
        (0..=steps)
            .map(|step| interpolate(start, end, f64::from(step) / f64::from(steps)))
            .all(|sample| {
                canvas.positions().all(|(key, placed)| {
                    key == a
                        || key == b
                        || manhattan(placed, sample) >= i64::from(self.config.clearance_radius)
                })
            })
    }
}

/// Point at parameter `t` along `start..end`, truncated toward zero.
fn interpolate(start: CanvasPoint, end: CanvasPoint, t: f64) -> CanvasPoint {
    let lerp = |from: i32, to: i32| (f64::from(from) * (1.0 - t) + f64::from(to) * t) as i32;
    Point2D::new(lerp(start.x, end.x), lerp(start.y, end.y))
}

/// Existing nodes of `nodes`, first occurrence order, duplicates dropped.
fn distinct_existing(graph: &Graph, nodes: &[NodeKey]) -> Vec<NodeKey> {
    let mut seen = BTreeSet::new();
    nodes
        .iter()
        .copied()
        .filter(|&key| graph.has_node(key) && seen.insert(key))
        .collect()
}
