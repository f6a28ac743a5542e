/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Interaction and algorithm core of an interactive graph editor.
//!
//! The crate owns graph state and exposes plain data for a presentation layer
//! to draw; it never renders or schedules anything itself.
//!
//! - [`graph`]: adjacency-set graph over integer node ids
//! - [`canvas`]: node positions, hit testing and collision-aware placement
//! - [`link`]: complete and degree/clearance-constrained random linking
//! - [`traversal`]: BFS and DFS with visitation order and parent map
//! - [`animation`]: clock-driven stepwise playback of a traversal
//! - [`session`]: the single-owner facade a UI talks to
//!
//! Logging goes through the `log` facade; installing a logger is up to the
//! host.

pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod graph;
pub mod link;
pub mod session;
pub mod traversal;

pub use animation::{AnimationEvent, AnimationSequencer, PlaybackPhase};
pub use canvas::{Canvas, CanvasPoint};
pub use config::GraphConfig;
pub use error::{ConfigError, PlacementError};
pub use graph::{EdgeKey, Graph, NodeKey};
pub use link::LinkEngine;
pub use session::{ClickOutcome, GraphIntent, GraphSession, PointerButton, SelectionState};
pub use traversal::{Traversal, TraversalKind, bfs, dfs};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
