/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the interactive editor.
//!
//! Core structures:
//! - `Graph`: adjacency-set arena, one slot per node id
//! - `NodeKey`: integer node identity (arena slot index)
//! - `EdgeKey`: normalized unordered node pair
//!
//! Every mutation is idempotent and silently ignores references to missing
//! nodes, so a UI can replay redundant calls without checking first.

use std::collections::BTreeSet;

use log::warn;

/// Node handle (arena slot index, stable across other deletions)
pub type NodeKey = usize;

/// Undirected edge handle. `low < high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    low: NodeKey,
    high: NodeKey,
}

impl EdgeKey {
    /// Normalize an endpoint pair. Returns `None` for a self-loop.
    pub fn new(a: NodeKey, b: NodeKey) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> NodeKey {
        self.low
    }

    pub fn high(&self) -> NodeKey {
        self.high
    }

    pub fn endpoints(&self) -> (NodeKey, NodeKey) {
        (self.low, self.high)
    }
}

/// Undirected, unweighted graph over small integer ids.
///
/// Slots are never compacted: removing a node frees its slot so that ids held
/// by edges, selections and traversal results stay meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    slots: Vec<Option<BTreeSet<NodeKey>>>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a node. Returns whether it was created.
    ///
    /// Ids are dense: `key` may refill a freed slot or take
    /// [`Graph::next_node_key`], anything above that is rejected.
    pub fn add_node(&mut self, key: NodeKey) -> bool {
        if key > self.slots.len() {
            warn!(
                "graph: refusing node {key}, next free id is {}",
                self.slots.len()
            );
            return false;
        }
        if key == self.slots.len() {
            self.slots.push(None);
        }
        match self.slots.get_mut(key) {
            Some(slot @ None) => {
                *slot = Some(BTreeSet::new());
                true
            },
            _ => false,
        }
    }

    /// Remove a node and all its incident edges. Returns whether it existed.
    pub fn del_node(&mut self, key: NodeKey) -> bool {
        let Some(neighbors) = self.slots.get_mut(key).and_then(Option::take) else {
            return false;
        };
        for neighbor in neighbors {
            if let Some(Some(adjacent)) = self.slots.get_mut(neighbor) {
                adjacent.remove(&key);
            }
        }
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        true
    }

    /// Add an undirected edge. Returns whether a new edge was created.
    pub fn add_edge(&mut self, a: NodeKey, b: NodeKey) -> bool {
        if EdgeKey::new(a, b).is_none() || !self.has_node(a) || !self.has_node(b) {
            return false;
        }
        let inserted = match self.slots.get_mut(a) {
            Some(Some(adjacent)) => adjacent.insert(b),
            _ => false,
        };
        if let Some(Some(adjacent)) = self.slots.get_mut(b) {
            adjacent.insert(a);
        }
        inserted
    }

    /// Remove an undirected edge. Returns whether it existed.
    pub fn remove_edge(&mut self, a: NodeKey, b: NodeKey) -> bool {
        let removed = match self.slots.get_mut(a) {
            Some(Some(adjacent)) => adjacent.remove(&b),
            _ => false,
        };
        if let Some(Some(adjacent)) = self.slots.get_mut(b) {
            adjacent.remove(&a);
        }
        removed
    }

    pub fn has_node(&self, key: NodeKey) -> bool {
        matches!(self.slots.get(key), Some(Some(_)))
    }

    pub fn has_edge(&self, a: NodeKey, b: NodeKey) -> bool {
        self.neighbors(a).is_some_and(|adjacent| adjacent.contains(&b))
    }

    /// Number of incident edges, or `None` for a missing node (not zero).
    pub fn degree(&self, key: NodeKey) -> Option<usize> {
        self.neighbors(key).map(BTreeSet::len)
    }

    /// Neighbors in ascending id order, or `None` for a missing node.
    pub fn neighbors(&self, key: NodeKey) -> Option<&BTreeSet<NodeKey>> {
        self.slots.get(key).and_then(Option::as_ref)
    }

    /// Id the next created node should take: `max(existing) + 1`, or `0`.
    pub fn next_node_key(&self) -> NodeKey {
        // Trailing free slots are trimmed in `del_node`.
        self.slots.len()
    }

    /// Existing node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(key, slot)| slot.as_ref().map(|_| key))
    }

    /// Every edge once, ordered by `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.slots.iter().enumerate().flat_map(|(key, slot)| {
            slot.iter()
                .flat_map(move |adjacent| adjacent.range(key + 1..))
                .map(move |&other| EdgeKey {
                    low: key,
                    high: other,
                })
        })
    }

    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(key, slot)| slot.as_ref().map(|adjacent| adjacent.range(key + 1..).count()))
            .sum()
    }

    /// Drop every edge, keep every node.
    pub fn clear_edges(&mut self) {
        for adjacent in self.slots.iter_mut().flatten() {
            adjacent.clear();
        }
    }

    /// Drop every node and edge.
    pub fn clear_graph(&mut self) {
        self.slots.clear();
    }
}
