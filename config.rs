/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Tunable constants for placement, linking and playback.
//!
//! Every field has a default matching the interactive editor's built-in
//! behavior, so hosts only need to supply the values they want to change.
//! A TOML document may set any subset:
//!
//! ```toml
//! [canvas]
//! width = 800
//! min_spacing = 80
//!
//! [animation]
//! tick_interval_ms = 500
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Canvas bounds and node spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: i32,
    pub height: i32,
    /// Interior margin from the left and right edges.
    pub margin_x: i32,
    /// Interior margin from the top and bottom edges.
    pub margin_y: i32,
    /// Minimum Manhattan distance between two node centers.
    pub min_spacing: i32,
    /// Manhattan radius within which a point addresses a node.
    pub hit_radius: i32,
    /// Random attempts before falling back to the raster scan.
    pub placement_attempts: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            margin_x: 50,
            margin_y: 50,
            min_spacing: 100,
            hit_radius: 30,
            placement_attempts: 500,
        }
    }
}

/// Random-link constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub max_degree: usize,
    /// Number of interpolation steps along an edge; `steps + 1` points are sampled.
    pub segment_samples: u32,
    /// Manhattan clearance an edge must keep from every uninvolved node.
    pub clearance_radius: i32,
    /// Node count used by random graph generation.
    pub generated_node_count: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_degree: 3,
            segment_samples: 100,
            clearance_radius: 40,
            generated_node_count: 10,
        }
    }
}

/// Playback cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub tick_interval_ms: u64,
    pub reset_delay_ms: u64,
}

impl AnimationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            reset_delay_ms: 3_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub canvas: CanvasConfig,
    pub link: LinkConfig,
    pub animation: AnimationConfig,
}

impl GraphConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GraphConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Reject values that would make placement or playback meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = &self.canvas;
        if canvas.min_spacing <= 0 {
            return Err(ConfigError::Invalid(
                "canvas.min_spacing must be positive".to_string(),
            ));
        }
        if canvas.margin_x < 0 || canvas.margin_y < 0 {
            return Err(ConfigError::Invalid(
                "canvas margins must not be negative".to_string(),
            ));
        }
        let interior = |extent: i32, margin: i32| {
            margin
                .checked_mul(2)
                .and_then(|both| extent.checked_sub(both))
                .filter(|span| *span >= 0)
        };
        if interior(canvas.width, canvas.margin_x).is_none()
            || interior(canvas.height, canvas.margin_y).is_none()
        {
            return Err(ConfigError::Invalid(format!(
                "canvas {}x{} leaves no interior inside margins {}x{}",
                canvas.width, canvas.height, canvas.margin_x, canvas.margin_y
            )));
        }
        if canvas.hit_radius < 0 {
            return Err(ConfigError::Invalid(
                "canvas.hit_radius must not be negative".to_string(),
            ));
        }
        if self.link.clearance_radius < 0 {
            return Err(ConfigError::Invalid(
                "link.clearance_radius must not be negative".to_string(),
            ));
        }
        if self.link.segment_samples == 0 {
            return Err(ConfigError::Invalid(
                "link.segment_samples must be at least 1".to_string(),
            ));
        }
        if self.animation.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation.tick_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
