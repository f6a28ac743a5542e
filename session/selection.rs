/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashSet;
use std::ops::Deref;

use crate::graph::NodeKey;

/// Canonical node-selection state.
///
/// This wraps the selected-node set with insertion order and a revision
/// counter so consumers can reason about selection changes deterministically.
/// Batch operations over the selection (linking, clearing) iterate in
/// selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    nodes: HashSet<NodeKey>,
    order: Vec<NodeKey>,
    revision: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic revision incremented whenever the selection changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The selected node when exactly one is selected.
    pub fn single(&self) -> Option<NodeKey> {
        match self.order.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Selected nodes in selection order.
    pub fn ordered(&self) -> &[NodeKey] {
        &self.order
    }

    /// Add `key` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, key: NodeKey) -> bool {
        let selected = if self.nodes.remove(&key) {
            self.order.retain(|existing| *existing != key);
            false
        } else {
            self.nodes.insert(key);
            self.order.push(key);
            true
        };
        self.revision = self.revision.saturating_add(1);
        selected
    }

    /// Drop `key` from the selection, e.g. because its node was removed.
    pub fn remove(&mut self, key: NodeKey) -> bool {
        if !self.nodes.remove(&key) {
            return false;
        }
        self.order.retain(|existing| *existing != key);
        self.revision = self.revision.saturating_add(1);
        true
    }

    pub fn clear(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        self.nodes.clear();
        self.order.clear();
        self.revision = self.revision.saturating_add(1);
    }

    /// Ordered pair of selected nodes when exactly two nodes are selected.
    pub fn ordered_pair(&self) -> Option<(NodeKey, NodeKey)> {
        match self.order.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }
}

impl Deref for SelectionState {
    type Target = HashSet<NodeKey>;

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}
