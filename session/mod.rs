/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Session state for the interactive graph editor.
//!
//! [`GraphSession`] is the single owner of the graph, the position map, the
//! selection, the link flags, the playback sequencer and the random source.
//! A UI layer either calls its methods directly or queues [`GraphIntent`]s
//! and applies them in order with [`GraphSession::apply_intents`]. Every call
//! runs to completion on the caller's thread; none of them fail on stale
//! node references.

use std::time::Duration;

use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animation::{AnimationEvent, AnimationSequencer};
use crate::canvas::{Canvas, CanvasPoint};
use crate::config::GraphConfig;
use crate::error::{ConfigError, PlacementError};
use crate::graph::{EdgeKey, Graph, NodeKey};
use crate::link::LinkEngine;
use crate::traversal::{Traversal, TraversalKind};

mod selection;

pub use selection::SelectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Place a node, or toggle the selection of the node under the pointer.
    Primary,
    /// Remove the node under the pointer.
    Secondary,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Placed(NodeKey),
    Selected(NodeKey),
    Deselected(NodeKey),
    Removed(NodeKey),
    /// Too close to an existing node, outside the interior, or a secondary
    /// click on empty space.
    Ignored,
}

/// Deterministic mutation intent boundary for session updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIntent {
    Click {
        point: CanvasPoint,
        button: PointerButton,
    },
    AddNodeAt {
        point: CanvasPoint,
    },
    PlaceRandomNode,
    RemoveNode {
        key: NodeKey,
    },
    ToggleSelection {
        key: NodeKey,
    },
    ClearSelection,
    AddEdge {
        a: NodeKey,
        b: NodeKey,
    },
    RemoveEdge {
        a: NodeKey,
        b: NodeKey,
    },
    ToggleEdgeBetweenSelected,
    ClearEdges,
    ClearAll,
    ToggleAutoLink,
    FullLinkSelected,
    RandomLinkSelected,
    GenerateGraph {
        node_count: Option<usize>,
    },
    PlayTraversal {
        kind: TraversalKind,
        start: Option<NodeKey>,
    },
    ResetAnimation,
}

pub struct GraphSession {
    config: GraphConfig,
    graph: Graph,
    canvas: Canvas,
    selection: SelectionState,
    links: LinkEngine,
    animation: AnimationSequencer,
    rng: StdRng,
}

impl GraphSession {
    /// Session with an entropy-seeded random source.
    ///
    /// `config` is validated first; see [`GraphConfig::validate`].
    pub fn new(config: GraphConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::from_entropy()))
    }

    /// Session whose placement and random linking replay exactly for `seed`.
    pub fn with_seed(config: GraphConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::seed_from_u64(seed)))
    }

    fn with_rng(config: GraphConfig, rng: StdRng) -> Self {
        Self {
            graph: Graph::new(),
            canvas: Canvas::new(config.canvas.clone()),
            selection: SelectionState::new(),
            links: LinkEngine::new(config.link.clone()),
            animation: AnimationSequencer::new(config.animation.clone()),
            rng,
            config,
        }
    }

    // --- queries ---

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn animation(&self) -> &AnimationSequencer {
        &self.animation
    }

    pub fn has_node(&self, key: NodeKey) -> bool {
        self.graph.has_node(key)
    }

    pub fn degree(&self, key: NodeKey) -> Option<usize> {
        self.graph.degree(key)
    }

    pub fn position(&self, key: NodeKey) -> Option<CanvasPoint> {
        self.canvas.position(key)
    }

    pub fn positions(&self) -> impl Iterator<Item = (NodeKey, CanvasPoint)> + '_ {
        self.canvas.positions()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.graph.edges()
    }

    pub fn node_at(&self, point: CanvasPoint) -> Option<NodeKey> {
        self.canvas.node_at(point)
    }

    pub fn auto_link(&self) -> bool {
        self.links.auto_link()
    }

    // --- node and edge mutation ---

    /// Place a node at `point` unless it is too close to another node or
    /// outside the interior. Links it to its predecessor in auto-link mode.
    pub fn add_node_at(&mut self, point: CanvasPoint) -> Option<NodeKey> {
        if self.canvas.is_too_close(point) {
            return None;
        }
        Some(self.insert_node(point))
    }

    /// Place a node at a generated position.
    pub fn place_random_node(&mut self) -> Result<NodeKey, PlacementError> {
        let point = self.canvas.generate_position(&mut self.rng)?;
        Ok(self.insert_node(point))
    }

    fn insert_node(&mut self, point: CanvasPoint) -> NodeKey {
        let key = self.graph.next_node_key();
        self.graph.add_node(key);
        self.canvas.set_position(key, point);
        let linked = self.links.link_new_node(&mut self.graph, key);
        debug!("node {key} placed at ({}, {}), auto-linked to {linked:?}", point.x, point.y);
        key
    }

    /// Remove a node, its edges, its position and its selection entry.
    ///
    /// A playback that includes the node is reset.
    pub fn remove_node(&mut self, key: NodeKey) -> bool {
        if !self.graph.del_node(key) {
            return false;
        }
        self.canvas.remove(key);
        self.selection.remove(key);
        if self.animation.traversal().parents.contains_key(&key) {
            self.animation.reset();
        }
        true
    }

    pub fn add_edge(&mut self, a: NodeKey, b: NodeKey) -> bool {
        self.graph.add_edge(a, b)
    }

    pub fn remove_edge(&mut self, a: NodeKey, b: NodeKey) -> bool {
        self.graph.remove_edge(a, b)
    }

    /// Add the edge if absent, remove it if present. Returns whether it now
    /// exists; `false` for invalid endpoints.
    pub fn toggle_edge(&mut self, a: NodeKey, b: NodeKey) -> bool {
        if self.graph.has_edge(a, b) {
            self.graph.remove_edge(a, b);
            false
        } else {
            self.graph.add_edge(a, b)
        }
    }

    /// Toggle the edge between exactly two selected nodes, then clear the
    /// selection. `None` unless exactly two nodes are selected.
    pub fn toggle_edge_between_selected(&mut self) -> Option<bool> {
        let (a, b) = self.selection.ordered_pair()?;
        let present = self.toggle_edge(a, b);
        self.selection.clear();
        Some(present)
    }

    pub fn clear_edges(&mut self) {
        self.graph.clear_edges();
    }

    /// Drop every node, edge, position and selection entry, and stop playback.
    pub fn clear_all(&mut self) {
        self.animation.reset();
        self.graph.clear_graph();
        self.canvas.clear();
        self.selection.clear();
    }

    // --- selection and linking ---

    /// Toggle selection of an existing node. Returns whether it is now selected.
    pub fn toggle_selection(&mut self, key: NodeKey) -> bool {
        if !self.graph.has_node(key) {
            return false;
        }
        self.selection.toggle(key)
    }

    pub fn toggle_auto_link(&mut self) -> bool {
        self.links.toggle_auto_link()
    }

    pub fn full_link_selected(&mut self) {
        debug!("full link over selection revision {}", self.selection.revision());
        LinkEngine::full_link(&mut self.graph, self.selection.ordered());
    }

    pub fn random_link_selected(&mut self) {
        debug!("random link over selection revision {}", self.selection.revision());
        self.links.random_link(
            &mut self.graph,
            &self.canvas,
            self.selection.ordered(),
            &mut self.rng,
        );
    }

    /// Replace everything with a random occlusion-free graph.
    ///
    /// Places up to `node_count` nodes (stopping early once the canvas is
    /// saturated), random-links all of them, then drops nodes left without
    /// an edge. Returns the number of nodes kept.
    pub fn generate_graph(&mut self, node_count: usize) -> usize {
        self.clear_all();
        for key in 0..node_count {
            match self.canvas.generate_position(&mut self.rng) {
                Ok(point) => {
                    self.graph.add_node(key);
                    self.canvas.set_position(key, point);
                },
                Err(e) => {
                    warn!("generate graph: placed {key} of {node_count} nodes: {e}");
                    break;
                },
            }
        }

        let nodes: Vec<NodeKey> = self.graph.nodes().collect();
        self.links
            .random_link(&mut self.graph, &self.canvas, &nodes, &mut self.rng);

        let isolated: Vec<NodeKey> = nodes
            .into_iter()
            .filter(|&key| self.graph.degree(key) == Some(0))
            .collect();
        for key in isolated {
            self.remove_node(key);
        }
        debug!(
            "generate graph: {} nodes, {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        self.graph.node_count()
    }

    /// Route a pointer click.
    ///
    /// Primary on a node toggles its selection, primary on empty space
    /// places a node, secondary on a node removes it.
    pub fn click(&mut self, point: CanvasPoint, button: PointerButton) -> ClickOutcome {
        match (self.canvas.node_at(point), button) {
            (Some(key), PointerButton::Primary) => {
                if self.toggle_selection(key) {
                    ClickOutcome::Selected(key)
                } else {
                    ClickOutcome::Deselected(key)
                }
            },
            (Some(key), PointerButton::Secondary) => {
                self.remove_node(key);
                ClickOutcome::Removed(key)
            },
            (None, PointerButton::Primary) => self
                .add_node_at(point)
                .map_or(ClickOutcome::Ignored, ClickOutcome::Placed),
            (None, PointerButton::Secondary) => ClickOutcome::Ignored,
        }
    }

    // --- traversal and playback ---

    /// Start node used when the caller supplies none: the single selected
    /// node, otherwise node `0`.
    pub fn default_start(&self) -> NodeKey {
        self.selection.single().unwrap_or(0)
    }

    pub fn traverse(&self, kind: TraversalKind, start: Option<NodeKey>) -> Traversal {
        kind.run(&self.graph, start.unwrap_or_else(|| self.default_start()))
    }

    pub fn bfs(&self, start: Option<NodeKey>) -> Traversal {
        self.traverse(TraversalKind::Bfs, start)
    }

    pub fn dfs(&self, start: Option<NodeKey>) -> Traversal {
        self.traverse(TraversalKind::Dfs, start)
    }

    /// Replay `traversal`, replacing any current playback.
    pub fn play(&mut self, traversal: Traversal) {
        self.animation.start(traversal);
    }

    /// Run a traversal and replay it. Returns whether playback started.
    pub fn play_traversal(&mut self, kind: TraversalKind, start: Option<NodeKey>) -> bool {
        let traversal = self.traverse(kind, start);
        if traversal.is_empty() {
            return false;
        }
        debug!(
            "{}: {} nodes from {:?}",
            kind.label(),
            traversal.len(),
            traversal.start()
        );
        self.play(traversal);
        true
    }

    pub fn reset_animation(&mut self) {
        self.animation.reset();
    }

    /// Apply one playback step now.
    pub fn tick(&mut self) -> Option<AnimationEvent> {
        self.animation.tick(&self.graph)
    }

    /// Fire the post-playback reset now.
    pub fn finish_drain(&mut self) -> bool {
        self.animation.finish_drain()
    }

    /// Feed elapsed host time to the playback timers.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<AnimationEvent> {
        self.animation.advance(elapsed, &self.graph)
    }

    // --- intents ---

    /// Apply a batch of intents deterministically in insertion order.
    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = GraphIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: GraphIntent) {
        match intent {
            GraphIntent::Click { point, button } => {
                self.click(point, button);
            },
            GraphIntent::AddNodeAt { point } => {
                self.add_node_at(point);
            },
            GraphIntent::PlaceRandomNode => {
                if let Err(e) = self.place_random_node() {
                    warn!("place random node: {e}");
                }
            },
            GraphIntent::RemoveNode { key } => {
                self.remove_node(key);
            },
            GraphIntent::ToggleSelection { key } => {
                self.toggle_selection(key);
            },
            GraphIntent::ClearSelection => self.selection.clear(),
            GraphIntent::AddEdge { a, b } => {
                self.add_edge(a, b);
            },
            GraphIntent::RemoveEdge { a, b } => {
                self.remove_edge(a, b);
            },
            GraphIntent::ToggleEdgeBetweenSelected => {
                self.toggle_edge_between_selected();
            },
            GraphIntent::ClearEdges => self.clear_edges(),
            GraphIntent::ClearAll => self.clear_all(),
            GraphIntent::ToggleAutoLink => {
                self.toggle_auto_link();
            },
            GraphIntent::FullLinkSelected => self.full_link_selected(),
            GraphIntent::RandomLinkSelected => self.random_link_selected(),
            GraphIntent::GenerateGraph { node_count } => {
                let node_count = node_count.unwrap_or(self.config.link.generated_node_count);
                self.generate_graph(node_count);
            },
            GraphIntent::PlayTraversal { kind, start } => {
                self.play_traversal(kind, start);
            },
            GraphIntent::ResetAnimation => self.reset_animation(),
        }
    }
}

impl Default for GraphSession {
    fn default() -> Self {
        Self::with_rng(GraphConfig::default(), StdRng::from_entropy())
    }
}
