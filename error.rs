/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Error types surfaced by the graph core.
//!
//! Graph mutations never fail; they are no-ops on invalid references. The
//! only fallible paths are node placement (the canvas can saturate) and
//! configuration loading.

use std::path::PathBuf;

/// Placement could not produce a legal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Random attempts and the raster fallback found no clear cell.
    NoPositionAvailable,
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::NoPositionAvailable => {
                write!(f, "no position available: canvas is saturated")
            },
        }
    }
}

impl std::error::Error for PlacementError {}

/// Errors from reading or validating a [`crate::config::GraphConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "IO error reading {}: {message}", path.display())
            },
            ConfigError::Parse(e) => write!(f, "Parse error: {e}"),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
