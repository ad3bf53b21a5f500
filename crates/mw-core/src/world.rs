use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MwError, MwResult};
use crate::tile::TileGrid;

/// A side of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// The west wall.
    Left,
    /// The east wall.
    Right,
    /// The ceiling.
    Top,
    /// The floor.
    Bottom,
}

impl Edge {
    /// All edges in canonical order.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// The facing edge.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Whether this is a left or right wall.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

/// A cell of the generation-time placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row, growing downward.
    pub y: i32,
}

impl GridPos {
    /// Creates a grid position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixels.
    pub x: i32,
    /// Vertical pixels, growing downward.
    pub y: i32,
}

/// A room's pixel size and tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomBounds {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Edge length of one tile in pixels.
    pub tile_size: u32,
}

impl RoomBounds {
    /// Bounds for a room measured in tiles.
    pub fn from_tiles(width_tiles: u32, height_tiles: u32, tile_size: u32) -> Self {
        Self {
            width: width_tiles * tile_size,
            height: height_tiles * tile_size,
            tile_size,
        }
    }

    /// Grid dimensions, `floor(width/tileSize) x floor(height/tileSize)`.
    pub fn tile_dims(&self) -> (usize, usize) {
        if self.tile_size == 0 {
            return (0, 0);
        }
        (
            (self.width / self.tile_size) as usize,
            (self.height / self.tile_size) as usize,
        )
    }
}

/// An opening in a room's border leading to another room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitZone {
    /// Exit id, unique within its room.
    pub id: String,
    /// Room-local pixel x of the trigger rectangle.
    pub x: u32,
    /// Room-local pixel y of the trigger rectangle.
    pub y: u32,
    /// Pixel width of the trigger rectangle.
    pub width: u32,
    /// Pixel height of the trigger rectangle.
    pub height: u32,
    /// Wall the exit sits on.
    pub edge: Edge,
    /// Normalized center along the edge, 0..1.
    pub edge_position: f64,
    /// Normalized start of the span along the edge.
    pub edge_start: f64,
    /// Normalized end of the span along the edge.
    pub edge_end: f64,
    /// First tile index along the edge.
    pub tile_start: usize,
    /// Last tile index along the edge, inclusive.
    pub tile_end: usize,
    /// Room this exit leads to.
    pub target_map_id: String,
}

/// One room of the world document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMapData {
    /// Room id.
    pub id: String,
    /// Pixel and tile dimensions.
    pub world: RoomBounds,
    /// Exits, grouped by edge.
    #[serde(default)]
    pub exits: Vec<ExitZone>,
    /// Tile grid, empty until filled.
    pub tiles: TileGrid,
    /// Cell in the generation-time placement grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_position: Option<GridPos>,
    /// Height in base-room units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_height: Option<u32>,
}

impl WorldMapData {
    /// A room with no exits and an empty grid sized to its bounds.
    pub fn new(id: impl Into<String>, world: RoomBounds) -> Self {
        let (w, h) = world.tile_dims();
        Self {
            id: id.into(),
            world,
            exits: Vec::new(),
            tiles: TileGrid::new(w, h),
            grid_position: None,
            grid_height: None,
        }
    }

    /// Number of tiles along the given edge.
    pub fn tiles_along(&self, edge: Edge) -> usize {
        let (w, h) = self.world.tile_dims();
        if edge.is_horizontal() { h } else { w }
    }

    /// Exits on one edge.
    pub fn exits_on(&self, edge: Edge) -> impl Iterator<Item = &ExitZone> {
        self.exits.iter().filter(move |e| e.edge == edge)
    }

    fn validate(&self) -> MwResult<()> {
        let (w, h) = self.world.tile_dims();
        if self.tiles.width() != w || self.tiles.height() != h {
            return Err(MwError::TileDimensions {
                room: self.id.clone(),
                expected_w: w,
                expected_h: h,
                actual_w: self.tiles.width(),
                actual_h: self.tiles.height(),
            });
        }
        for exit in &self.exits {
            let len = self.tiles_along(exit.edge);
            if exit.tile_start > exit.tile_end || exit.tile_end >= len {
                return Err(MwError::ExitRange {
                    room: self.id.clone(),
                    exit: exit.id.clone(),
                    edge: exit.edge,
                    start: exit.tile_start,
                    end: exit.tile_end,
                    len,
                });
            }
        }
        Ok(())
    }
}

/// The complete world document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldData {
    /// Seed the world was generated from.
    pub seed: String,
    /// Who generated or edited the world.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Room the player spawns in.
    pub starting_map: String,
    /// Spawn point inside the starting room, in room-local pixels.
    pub starting_position: Point,
    /// Rooms keyed by id.
    pub maps: BTreeMap<String, WorldMapData>,
}

impl WorldData {
    /// Look up a room by id.
    pub fn room(&self, id: &str) -> MwResult<&WorldMapData> {
        self.maps
            .get(id)
            .ok_or_else(|| MwError::RoomNotFound(id.to_string()))
    }

    /// Look up a room by id for modification.
    pub fn room_mut(&mut self, id: &str) -> MwResult<&mut WorldMapData> {
        self.maps
            .get_mut(id)
            .ok_or_else(|| MwError::RoomNotFound(id.to_string()))
    }

    /// Room ids in document order.
    pub fn room_ids(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    /// Total exit count across all rooms.
    pub fn exit_count(&self) -> usize {
        self.maps.values().map(|m| m.exits.len()).sum()
    }

    /// Check the document invariants: the starting map exists, every exit
    /// targets an existing room, and every grid and exit range fits its room.
    pub fn validate(&self) -> MwResult<()> {
        if !self.maps.contains_key(&self.starting_map) {
            return Err(MwError::MissingStartingMap(self.starting_map.clone()));
        }
        for (id, room) in &self.maps {
            if *id != room.id {
                return Err(MwError::Validation(format!(
                    "room keyed \"{id}\" carries id \"{}\"",
                    room.id
                )));
            }
            for exit in &room.exits {
                if !self.maps.contains_key(&exit.target_map_id) {
                    return Err(MwError::DanglingExit {
                        room: id.clone(),
                        exit: exit.id.clone(),
                        target: exit.target_map_id.clone(),
                    });
                }
            }
            room.validate()?;
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> MwResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> MwResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
