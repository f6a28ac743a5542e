/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Canvas-space node positions and collision-aware placement.
//!
//! Distances are Manhattan (`|dx| + |dy|`) throughout: spacing between nodes,
//! hit testing, and the edge clearance test in [`crate::link`] all use the
//! same metric.

use std::collections::BTreeMap;

use euclid::default::Point2D;
use log::{debug, warn};
use rand::Rng;

use crate::config::CanvasConfig;
use crate::error::PlacementError;
use crate::graph::NodeKey;

/// Integer canvas coordinate.
pub type CanvasPoint = Point2D<i32>;

/// Manhattan distance between two canvas points.
///
/// Widened to `i64` so any pair of `i32` coordinates fits.
pub fn manhattan(a: CanvasPoint, b: CanvasPoint) -> i64 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    dx.abs() + dy.abs()
}

/// Position map plus the placement rules of a bounded canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    config: CanvasConfig,
    positions: BTreeMap<NodeKey, CanvasPoint>,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            positions: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn position(&self, key: NodeKey) -> Option<CanvasPoint> {
        self.positions.get(&key).copied()
    }

    /// Positions in ascending node order.
    pub fn positions(&self) -> impl Iterator<Item = (NodeKey, CanvasPoint)> + '_ {
        self.positions.iter().map(|(&key, &point)| (key, point))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Record a position. Placement rules are the caller's concern.
    pub fn set_position(&mut self, key: NodeKey, point: CanvasPoint) {
        self.positions.insert(key, point);
    }

    pub fn remove(&mut self, key: NodeKey) -> Option<CanvasPoint> {
        self.positions.remove(&key)
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Whether `point` lies inside the margins (inclusive).
    pub fn in_interior(&self, point: CanvasPoint) -> bool {
        let (min, max) = self.interior();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// True if `point` is outside the interior or closer than `min_spacing`
    /// to any placed node.
    pub fn is_too_close(&self, point: CanvasPoint) -> bool {
        !self.in_interior(point)
            || self
                .positions
                .values()
                .any(|&placed| manhattan(placed, point) < i64::from(self.config.min_spacing))
    }

    /// First node (ascending id) within `hit_radius` of `point`.
    pub fn node_at(&self, point: CanvasPoint) -> Option<NodeKey> {
        self.positions
            .iter()
            .find(|(_, placed)| manhattan(**placed, point) <= i64::from(self.config.hit_radius))
            .map(|(&key, _)| key)
    }

    /// Find a clear interior position.
    ///
    /// Tries `placement_attempts` uniform random points, then scans the
    /// interior row by row in `min_spacing` steps. Never returns a point that
    /// [`Canvas::is_too_close`] rejects.
    pub fn generate_position<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<CanvasPoint, PlacementError> {
        let (min, max) = self.interior();
        if min.x > max.x || min.y > max.y {
            return Err(PlacementError::NoPositionAvailable);
        }

        for _ in 0..self.config.placement_attempts {
            let candidate = Point2D::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
            if !self.is_too_close(candidate) {
                return Ok(candidate);
            }
        }

        debug!(
            "placement: {} random attempts exhausted, falling back to raster scan",
            self.config.placement_attempts
        );
        self.raster_scan().ok_or_else(|| {
            warn!(
                "placement: canvas {}x{} saturated with {} nodes",
                self.config.width,
                self.config.height,
                self.positions.len()
            );
            PlacementError::NoPositionAvailable
        })
    }

    fn raster_scan(&self) -> Option<CanvasPoint> {
        let (min, max) = self.interior();
        let step = usize::try_from(self.config.min_spacing.max(1)).unwrap_or(1);
        (min.y..=max.y)
            .step_by(step)
            .flat_map(|y| (min.x..=max.x).step_by(step).map(move |x| Point2D::new(x, y)))
            .find(|&candidate| !self.is_too_close(candidate))
    }

    fn interior(&self) -> (CanvasPoint, CanvasPoint) {
        let config = &self.config;
        (
            Point2D::new(config.margin_x, config.margin_y),
            Point2D::new(
                config.width.saturating_sub(config.margin_x),
                config.height.saturating_sub(config.margin_y),
            ),
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}
