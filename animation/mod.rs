/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Stepwise playback of a traversal.
//!
//! The sequencer is a plain state machine with no scheduling of its own. A
//! host drives it either by calling [`AnimationSequencer::tick`] and
//! [`AnimationSequencer::finish_drain`] from its own timers, or by feeding
//! elapsed wall time to [`AnimationSequencer::advance`], which fires the armed
//! timer as many times as the elapsed time covers.
//!
//! ```text
//! Idle --start--> Playing --tick x len--> Draining --reset delay--> Idle
//!   ^                |                        |
//!   +-----reset------+------------------------+
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use log::debug;

use crate::config::AnimationConfig;
use crate::graph::{EdgeKey, Graph, NodeKey};
use crate::traversal::Traversal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No playback; step index is unset.
    Idle,
    /// Steps remain to be applied.
    Playing,
    /// Every step applied; waiting for the reset delay.
    Draining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Periodic, fires one step per interval.
    Tick,
    /// One-shot, clears the finished playback.
    ResetDelay,
}

/// The single timer a playback may have armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    pub kind: TimerKind,
    pub remaining: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// `node` was marked visited, along with its parent edge when present.
    Stepped {
        index: usize,
        node: NodeKey,
        edge: Option<EdgeKey>,
    },
    /// The last step was applied and the reset delay armed.
    Finished,
    /// The reset delay elapsed and visited state was cleared.
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct AnimationSequencer {
    config: AnimationConfig,
    traversal: Traversal,
    index: Option<usize>,
    visited_nodes: BTreeSet<NodeKey>,
    visited_edges: BTreeSet<EdgeKey>,
    timer: Option<ArmedTimer>,
}

impl AnimationSequencer {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        match self.index {
            None => PlaybackPhase::Idle,
            Some(index) if index < self.traversal.len() => PlaybackPhase::Playing,
            Some(_) => PlaybackPhase::Draining,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == PlaybackPhase::Idle
    }

    /// Next step to apply; `None` while idle.
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    /// The traversal being replayed (empty while idle).
    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    /// Node of the most recently applied step.
    pub fn highlighted(&self) -> Option<NodeKey> {
        let applied = self.index?.checked_sub(1)?;
        self.traversal.order.get(applied).copied()
    }

    pub fn visited_nodes(&self) -> &BTreeSet<NodeKey> {
        &self.visited_nodes
    }

    pub fn visited_edges(&self) -> &BTreeSet<EdgeKey> {
        &self.visited_edges
    }

    pub fn is_node_visited(&self, key: NodeKey) -> bool {
        self.visited_nodes.contains(&key)
    }

    pub fn is_edge_visited(&self, a: NodeKey, b: NodeKey) -> bool {
        EdgeKey::new(a, b).is_some_and(|edge| self.visited_edges.contains(&edge))
    }

    pub fn armed_timer(&self) -> Option<ArmedTimer> {
        self.timer
    }

    /// Begin replaying `traversal`, replacing any playback and its timer.
    ///
    /// An empty traversal leaves the sequencer idle.
    pub fn start(&mut self, traversal: Traversal) {
        self.reset();
        if traversal.is_empty() {
            return;
        }
        debug!("animation: starting playback of {} steps", traversal.len());
        self.traversal = traversal;
        self.index = Some(0);
        self.timer = Some(ArmedTimer {
            kind: TimerKind::Tick,
            remaining: self.config.tick_interval(),
        });
    }

    /// Apply one step. No-op unless playing.
    ///
    /// The parent edge is marked only if it still exists in `graph`. After
    /// the last step the periodic tick is replaced by the reset delay.
    pub fn tick(&mut self, graph: &Graph) -> Option<AnimationEvent> {
        if self.phase() != PlaybackPhase::Playing {
            return None;
        }
        let index = self.index?;
        let node = *self.traversal.order.get(index)?;

        self.visited_nodes.insert(node);
        let edge = self
            .traversal
            .parent_of(node)
            .filter(|&parent| graph.has_edge(node, parent))
            .and_then(|parent| EdgeKey::new(node, parent));
        if let Some(edge) = edge {
            self.visited_edges.insert(edge);
        }

        let next = index + 1;
        self.index = Some(next);
        if next == self.traversal.len() {
            debug!("animation: playback complete, reset in {:?}", self.config.reset_delay());
            self.timer = Some(ArmedTimer {
                kind: TimerKind::ResetDelay,
                remaining: self.config.reset_delay(),
            });
        }
        Some(AnimationEvent::Stepped { index, node, edge })
    }

    /// The reset-delay callback. Returns whether anything was cleared.
    pub fn finish_drain(&mut self) -> bool {
        if self.phase() != PlaybackPhase::Draining {
            return false;
        }
        self.reset();
        true
    }

    /// Cancel any armed timer and return to idle.
    pub fn reset(&mut self) {
        self.traversal = Traversal::default();
        self.index = None;
        self.visited_nodes.clear();
        self.visited_edges.clear();
        self.timer = None;
    }

    /// Feed `elapsed` wall time to the armed timer.
    ///
    /// Fires every expiry that `elapsed` covers, in order, carrying leftover
    /// time into the next armed timer.
    pub fn advance(&mut self, elapsed: Duration, graph: &Graph) -> Vec<AnimationEvent> {
        let mut events = Vec::new();
        let mut budget = elapsed;
        while let Some(timer) = self.timer.as_mut() {
            if budget < timer.remaining {
                timer.remaining -= budget;
                break;
            }
            budget -= timer.remaining;
            match timer.kind {
                TimerKind::Tick => {
                    timer.remaining = self.config.tick_interval();
                    events.extend(self.tick(graph));
                    if self.phase() == PlaybackPhase::Draining {
                        events.push(AnimationEvent::Finished);
                    }
                },
                TimerKind::ResetDelay => {
                    if self.finish_drain() {
                        events.push(AnimationEvent::Cleared);
                    }
                    self.timer = None;
                },
            }
        }
        events
    }
}
