//! Core types for Mapweaver: room graphs, world documents, and tile grids.
//!
//! This crate defines the data model shared by the generator, the tile filler
//! and the layout system. Everything here is plain data plus the seeded RNG
//! that every other crate draws from. Documents serialize to the JSON format
//! consumed by the game and editor layers.

/// Error types used throughout the workspace.
pub mod error;
/// Abstract room graph: nodes, gated connections, and the graph itself.
pub mod graph;
/// Deterministic string-seeded random number generator.
pub mod rng;
/// Tiles and row-major tile grids.
pub mod tile;
/// Concrete world documents: rooms, exits, and the world itself.
pub mod world;

/// Re-export error types.
pub use error::{MwError, MwResult};
/// Re-export graph types.
pub use graph::{
    Connection, GateKind, GateRequirement, GatingMode, GraphMeta, ItemToken, RoomNode, WorldGraph,
};
/// Re-export the RNG.
pub use rng::{SeededRng, normalize_seed};
/// Re-export tile types.
pub use tile::{Tile, TileGrid};
/// Re-export world document types.
pub use world::{Edge, ExitZone, GridPos, Point, RoomBounds, WorldData, WorldMapData};
