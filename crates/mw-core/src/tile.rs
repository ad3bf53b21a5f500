use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single cell of a room's tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    /// Walkable air.
    #[default]
    Empty,
    /// Collidable wall or floor.
    Solid,
}

impl Tile {
    /// The document encoding: 0 for empty, 1 for solid.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Solid => 1,
        }
    }

    /// Decode a document value. Any nonzero value is solid.
    pub fn from_u8(value: u8) -> Self {
        if value == 0 { Self::Empty } else { Self::Solid }
    }

    /// Whether the tile blocks movement.
    pub fn is_solid(self) -> bool {
        self == Self::Solid
    }
}

/// A cell as found in a persisted document: either a raw integer or an
/// editor-annotated object. The annotation is not part of this crate's
/// contract, so only its `type` survives loading.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentCell {
    Raw(u8),
    Annotated {
        #[serde(rename = "type")]
        kind: u8,
    },
}

impl DocumentCell {
    fn tile(&self) -> Tile {
        match self {
            Self::Raw(v) => Tile::from_u8(*v),
            Self::Annotated { kind, .. } => Tile::from_u8(*kind),
        }
    }
}

/// A row-major grid of tiles. Coordinates are `(x, y)` with `y` growing downward.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    /// An all-empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Tile::Empty)
    }

    /// A grid with every cell set to `tile`.
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            cells: vec![tile; width * height],
        }
    }

    /// Width in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// The tile at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.cells[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// Whether `(x, y)` is solid. Cells outside the grid count as solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(Tile::is_solid)
    }

    /// Whether `(x, y)` is an in-bounds empty cell.
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(Tile::Empty)
    }

    /// Set the tile at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width + x as usize] = tile;
        }
    }

    /// The center cell.
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Number of cells holding `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|t| **t == tile).count()
    }

    /// Fraction of solid cells, 0 for an empty grid.
    pub fn solid_ratio(&self) -> f64 {
        if self.cells.is_empty() {
            0.0
        } else {
            self.count(Tile::Solid) as f64 / self.cells.len() as f64
        }
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        // `chunks(0)` panics, and an empty grid has no rows anyway.
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Build a grid from `0`/`1` rows. Ragged input is padded with empty cells.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, v) in row.iter().enumerate() {
                grid.set(x as i32, y as i32, Tile::from_u8(*v));
            }
        }
        grid
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|t| if t.is_solid() { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl Serialize for TileGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<Vec<u8>> = self
            .rows()
            .map(|row| row.iter().map(|t| t.as_u8()).collect())
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TileGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows: Vec<Vec<DocumentCell>> = Vec::deserialize(deserializer)?;
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(D::Error::custom(format!(
                "tile row {bad} has {} cells, expected {width}",
                rows[bad].len()
            )));
        }
        let cells = rows.iter().flatten().map(DocumentCell::tile).collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }
}
