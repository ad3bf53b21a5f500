//! Room tile filling for Mapweaver.
//!
//! [`fill_room`] turns a room's size and exits into a solid/empty tile grid
//! using one of three generators, then runs the shared [`repair`] passes.
//! Output is a pure function of the room, the algorithm, the world seed and a
//! regeneration counter, so a caller can reroll a single room and get a new
//! but reproducible layout.
//!
//! Every grid returned for a room at least five tiles on a side has no
//! single-tile gaps in any row or column, and every empty cell is reachable
//! from the center and from every exit.

use std::fmt;
use std::str::FromStr;

use mw_core::{MwError, MwResult, SeededRng, TileGrid, WorldData, WorldMapData};
use serde::{Deserialize, Serialize};

/// Read-only grid checks.
pub mod analysis;
/// Cellular-automata caves.
pub mod cave;
/// Walled corridors with a walkway.
pub mod corridor;
/// Shared drawing helpers and exit apertures.
pub mod grid;
/// Open-air terrain with platforms.
pub mod outside;
/// Gap and connectivity repair.
pub mod repair;

/// Smallest side length the generators work on; smaller rooms stay open.
pub const MIN_FILL_SIDE: usize = 5;

/// Which generator fills a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Smoothed random noise.
    #[default]
    Cave,
    /// Terrain line and floating platforms.
    Outside,
    /// Border, floor, ceiling and a walkway.
    Corridor,
}

impl Algorithm {
    /// Every algorithm.
    pub const ALL: [Algorithm; 3] = [Algorithm::Cave, Algorithm::Outside, Algorithm::Corridor];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cave => write!(f, "cave"),
            Self::Outside => write!(f, "outside"),
            Self::Corridor => write!(f, "corridor"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = MwError;

    fn from_str(s: &str) -> MwResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "cave" => Ok(Self::Cave),
            "outside" => Ok(Self::Outside),
            "corridor" => Ok(Self::Corridor),
            other => Err(MwError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Options for [`fill_room`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillOptions {
    /// Generator to use.
    pub algorithm: Algorithm,
    /// World seed.
    pub seed: String,
    /// Reroll counter; bump it for a different layout of the same room.
    pub regeneration: u32,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Cave,
            seed: "default".to_string(),
            regeneration: 0,
        }
    }
}

impl FillOptions {
    /// Options for a world seed with the default algorithm.
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Set the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the regeneration counter.
    pub fn with_regeneration(mut self, regeneration: u32) -> Self {
        self.regeneration = regeneration;
        self
    }

    fn rng_seed(&self, room_id: &str) -> String {
        format!(
            "{}-{room_id}-{}-{}",
            self.seed, self.algorithm, self.regeneration
        )
    }
}

/// Fill one room. The room itself is not modified.
pub fn fill_room(room: &WorldMapData, options: &FillOptions) -> TileGrid {
    let (width, height) = room.world.tile_dims();
    if width < MIN_FILL_SIDE || height < MIN_FILL_SIDE {
        return TileGrid::new(width, height);
    }

    let mut rng = SeededRng::new(&options.rng_seed(&room.id));
    let blank = TileGrid::new(width, height);
    let apertures = grid::apertures(&blank, &room.exits);
    let mut tiles = match options.algorithm {
        Algorithm::Cave => cave::fill(width, height, &apertures, &mut rng),
        Algorithm::Outside => outside::fill(width, height, &apertures, &mut rng),
        Algorithm::Corridor => corridor::fill(width, height, &apertures, &mut rng),
    };
    repair::repair(&mut tiles, &apertures);

    tracing::debug!(
        target: "mapweaver::tiles",
        room = %room.id,
        algorithm = %options.algorithm,
        regeneration = options.regeneration,
        solid = tiles.solid_ratio(),
        "room.filled"
    );
    tiles
}

/// A copy of `world` with every room filled.
pub fn fill_world(world: &WorldData, algorithm: Algorithm, regeneration: u32) -> WorldData {
    let options = FillOptions::new(world.seed.clone())
        .with_algorithm(algorithm)
        .with_regeneration(regeneration);
    let mut filled = world.clone();
    for room in filled.maps.values_mut() {
        room.tiles = fill_room(room, &options);
    }
    filled
}
