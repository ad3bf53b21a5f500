//! Generation and conversion options.
//!
//! Every field has a default so option files can be partial. Out-of-range
//! values are never rejected; [`GraphOptions::clamped`] pulls them into range.

use mw_core::{GatingMode, normalize_seed};
use serde::{Deserialize, Serialize};

/// Smallest graph the generator builds.
pub const MIN_ROOMS: usize = 4;
/// Largest graph the generator builds; loop candidates grow quadratically.
pub const MAX_ROOMS: usize = 1000;
/// Highest fraction of eligible edges that may be gated.
pub const MAX_GATE_FREQUENCY: f64 = 0.9;

/// How gates are placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatingOptions {
    /// Which item kinds gates require.
    pub mode: GatingMode,
    /// Fraction of eligible edges to gate, 0..=0.9.
    pub gate_frequency: f64,
}

impl Default for GatingOptions {
    fn default() -> Self {
        Self {
            mode: GatingMode::Keys,
            gate_frequency: 0.3,
        }
    }
}

/// Options for [`generate_world_graph`](crate::generate_world_graph).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    /// Number of rooms to build (at least 4).
    pub room_count: usize,
    /// Seed string; trimmed, empty becomes `"default"`.
    pub seed: String,
    /// Share of loop candidates to turn into edges, 0..=1.
    pub loops_ratio: f64,
    /// Children added per branch attachment (rounded, at least 1).
    pub branch_factor: f64,
    /// Gate placement.
    pub gating: GatingOptions,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            room_count: 12,
            seed: "default".to_string(),
            loops_ratio: 0.3,
            branch_factor: 1.0,
            gating: GatingOptions::default(),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

impl GraphOptions {
    /// Set the seed string.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Set the target room count.
    pub fn with_room_count(mut self, rooms: usize) -> Self {
        self.room_count = rooms;
        self
    }

    /// Set the loop ratio.
    pub fn with_loops_ratio(mut self, ratio: f64) -> Self {
        self.loops_ratio = ratio;
        self
    }

    /// Set the branch factor.
    pub fn with_branch_factor(mut self, factor: f64) -> Self {
        self.branch_factor = factor;
        self
    }

    /// Set the gating mode.
    pub fn with_gating_mode(mut self, mode: GatingMode) -> Self {
        self.gating.mode = mode;
        self
    }

    /// Set the gate frequency.
    pub fn with_gate_frequency(mut self, frequency: f64) -> Self {
        self.gating.gate_frequency = frequency;
        self
    }

    /// A copy with every field pulled into its valid range and the seed normalized.
    pub fn clamped(&self) -> Self {
        Self {
            room_count: self.room_count.clamp(MIN_ROOMS, MAX_ROOMS),
            seed: normalize_seed(&self.seed),
            loops_ratio: finite_or(self.loops_ratio, 0.0).clamp(0.0, 1.0),
            branch_factor: finite_or(self.branch_factor, 0.0).max(0.0),
            gating: GatingOptions {
                mode: self.gating.mode,
                gate_frequency: finite_or(self.gating.gate_frequency, 0.0)
                    .clamp(0.0, MAX_GATE_FREQUENCY),
            },
        }
    }
}

/// Options for [`convert_to_world_data`](crate::convert_to_world_data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Tile edge length in pixels (at least 1).
    pub tile_size: u32,
    /// Recorded in the world document.
    pub author: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            tile_size: 16,
            author: None,
        }
    }
}

impl ConvertOptions {
    /// Set the tile size in pixels.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the author recorded in the document.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
