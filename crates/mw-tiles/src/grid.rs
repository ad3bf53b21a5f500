//! Drawing helpers shared by the fill algorithms.

use mw_core::{Edge, ExitZone, Tile, TileGrid};

/// Set every cell of the inclusive rectangle `(x0, y0)..=(x1, y1)`.
/// Corners may be given in any order; cells outside the grid are skipped.
pub fn fill_rect(grid: &mut TileGrid, x0: i32, y0: i32, x1: i32, y1: i32, tile: Tile) {
    for y in y0.min(y1)..=y0.max(y1) {
        for x in x0.min(x1)..=x0.max(x1) {
            grid.set(x, y, tile);
        }
    }
}

/// Clear the inclusive rectangle `(x0, y0)..=(x1, y1)`.
pub fn carve_rect(grid: &mut TileGrid, x0: i32, y0: i32, x1: i32, y1: i32) {
    fill_rect(grid, x0, y0, x1, y1, Tile::Empty);
}

/// Clear the rectangle, clipped to the interior so the outer ring is untouched.
pub fn carve_interior_rect(grid: &mut TileGrid, x0: i32, y0: i32, x1: i32, y1: i32) {
    let (max_x, max_y) = (grid.width() as i32 - 2, grid.height() as i32 - 2);
    let (lx, hx) = (x0.min(x1).max(1), x0.max(x1).min(max_x));
    let (ly, hy) = (y0.min(y1).max(1), y0.max(y1).min(max_y));
    if lx <= hx && ly <= hy {
        carve_rect(grid, lx, ly, hx, hy);
    }
}

/// Clear an orthogonal L-shaped path from `from` to `to`, `2 * half_width + 1`
/// tiles thick. The horizontal leg comes first when `horizontal_first` is set.
pub fn carve_line(
    grid: &mut TileGrid,
    from: (i32, i32),
    to: (i32, i32),
    half_width: i32,
    horizontal_first: bool,
) {
    let hw = half_width.max(0);
    let corner = if horizontal_first {
        (to.0, from.1)
    } else {
        (from.0, to.1)
    };
    for (a, b) in [(from, corner), (corner, to)] {
        if a.1 == b.1 {
            carve_rect(grid, a.0, a.1 - hw, b.0, b.1 + hw);
        } else {
            carve_rect(grid, a.0 - hw, a.1, b.0 + hw, b.1);
        }
    }
}

/// The cell `depth` tiles in from `edge`, at offset `along` on that edge.
pub fn edge_cell(grid: &TileGrid, edge: Edge, along: i32, depth: i32) -> (i32, i32) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    match edge {
        Edge::Left => (depth, along),
        Edge::Right => (w - 1 - depth, along),
        Edge::Top => (along, depth),
        Edge::Bottom => (along, h - 1 - depth),
    }
}

/// The opening an exit cuts through a room's outer ring.
///
/// Apertures never include a corner cell and are at least two tiles wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aperture {
    /// Wall the opening is on.
    pub edge: Edge,
    /// First tile along the wall.
    pub start: i32,
    /// Last tile along the wall, inclusive.
    pub end: i32,
}

impl Aperture {
    /// The aperture for an exit, or `None` if the wall is too short to hold
    /// a two-tile opening away from the corners.
    pub fn for_exit(grid: &TileGrid, exit: &ExitZone) -> Option<Self> {
        let tiles = if exit.edge.is_horizontal() {
            grid.height()
        } else {
            grid.width()
        };
        let len = tiles as i32;
        if len < 4 {
            return None;
        }
        let clamp = |v: usize| (v.min(i32::MAX as usize) as i32).clamp(1, len - 2);
        let a = clamp(exit.tile_start);
        let b = clamp(exit.tile_end);
        let (mut start, mut end) = (a.min(b), a.max(b));
        if start == end {
            if end < len - 2 {
                end += 1;
            } else {
                start -= 1;
            }
        }
        Some(Self {
            edge: exit.edge,
            start,
            end,
        })
    }

    /// Center offset along the wall.
    pub fn mid(&self) -> i32 {
        (self.start + self.end) / 2
    }

    /// The opening's cells on the outer ring.
    pub fn cells(&self, grid: &TileGrid) -> Vec<(i32, i32)> {
        (self.start..=self.end)
            .map(|along| edge_cell(grid, self.edge, along, 0))
            .collect()
    }

    /// The border cell at the middle of the opening.
    pub fn midpoint(&self, grid: &TileGrid) -> (i32, i32) {
        edge_cell(grid, self.edge, self.mid(), 0)
    }

    /// One tile inward from [`midpoint`](Self::midpoint).
    pub fn inside(&self, grid: &TileGrid) -> (i32, i32) {
        edge_cell(grid, self.edge, self.mid(), 1)
    }

    /// Clear the opening `depth` tiles deep (at least one).
    pub fn carve(&self, grid: &mut TileGrid, depth: i32) {
        let (x0, y0) = edge_cell(grid, self.edge, self.start, 0);
        let (x1, y1) = edge_cell(grid, self.edge, self.end, depth.max(1) - 1);
        carve_rect(grid, x0, y0, x1, y1);
    }
}

/// Apertures for every exit of a room that can hold one.
pub fn apertures(grid: &TileGrid, exits: &[ExitZone]) -> Vec<Aperture> {
    exits
        .iter()
        .filter_map(|exit| Aperture::for_exit(grid, exit))
        .collect()
}

/// Force the outer ring solid.
pub fn solid_border(grid: &mut TileGrid) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    fill_rect(grid, 0, 0, w - 1, 0, Tile::Solid);
    fill_rect(grid, 0, h - 1, w - 1, h - 1, Tile::Solid);
    fill_rect(grid, 0, 0, 0, h - 1, Tile::Solid);
    fill_rect(grid, w - 1, 0, w - 1, h - 1, Tile::Solid);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit(edge: Edge, start: usize, end: usize) -> ExitZone {
        ExitZone {
            id: "e".into(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            edge,
            edge_position: 0.5,
            edge_start: 0.0,
            edge_end: 0.0,
            tile_start: start,
            tile_end: end,
            target_map_id: "t".into(),
        }
    }

    #[test]
    fn apertures_avoid_corners() {
        let grid = TileGrid::new(10, 8);
        let a = Aperture::for_exit(&grid, &exit(Edge::Left, 0, 2)).unwrap();
        assert_eq!((a.start, a.end), (1, 2));
        let a = Aperture::for_exit(&grid, &exit(Edge::Top, 7, 9)).unwrap();
        assert_eq!((a.start, a.end), (7, 8));
    }

    #[test]
    fn apertures_are_at_least_two_wide() {
        let grid = TileGrid::new(10, 8);
        let a = Aperture::for_exit(&grid, &exit(Edge::Right, 6, 7)).unwrap();
        assert_eq!((a.start, a.end), (5, 6));
        let a = Aperture::for_exit(&grid, &exit(Edge::Bottom, 4, 4)).unwrap();
        assert_eq!((a.start, a.end), (4, 5));
        assert!(Aperture::for_exit(&TileGrid::new(3, 3), &exit(Edge::Left, 0, 2)).is_none());
    }

    #[test]
    fn aperture_geometry() {
        let mut grid = TileGrid::filled(10, 8, Tile::Solid);
        let a = Aperture::for_exit(&grid, &exit(Edge::Right, 3, 5)).unwrap();
        assert_eq!(a.midpoint(&grid), (9, 4));
        assert_eq!(a.inside(&grid), (8, 4));
        a.carve(&mut grid, 2);
        assert_eq!(grid.count(Tile::Empty), 6);
        assert!(grid.is_empty(8, 3) && grid.is_empty(9, 5));
    }

    #[test]
    fn lines_are_l_shaped_and_thick() {
        let mut grid = TileGrid::filled(12, 12, Tile::Solid);
        carve_line(&mut grid, (2, 2), (8, 8), 1, true);
        // Horizontal leg along y=2, then vertical leg along x=8.
        assert!(grid.is_empty(5, 1) && grid.is_empty(5, 3));
        assert!(grid.is_empty(7, 6) && grid.is_empty(9, 6));
        assert!(grid.is_solid(2, 8));
    }

    #[test]
    fn interior_carves_keep_the_border() {
        let mut grid = TileGrid::filled(6, 6, Tile::Solid);
        carve_interior_rect(&mut grid, -3, -3, 9, 9);
        assert_eq!(grid.count(Tile::Empty), 16);
        assert!(grid.is_solid(0, 3) && grid.is_solid(5, 3));
    }
}
