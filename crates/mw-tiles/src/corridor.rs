//! Built corridors: walls, floor, ceiling and a shared walkway.

use mw_core::{Edge, SeededRng, Tile, TileGrid};

use crate::grid::{Aperture, carve_line, fill_rect, solid_border};

/// Floating platforms scattered per room.
pub const PLATFORM_COUNT: usize = 5;

/// Row of the shared walkway, 60% of the way down.
pub fn walkway_row(height: usize) -> i32 {
    (height as f64 * 0.6).floor() as i32
}

/// Fill a corridor room.
pub fn fill(width: usize, height: usize, apertures: &[Aperture], rng: &mut SeededRng) -> TileGrid {
    let mut grid = TileGrid::new(width, height);
    let (w, h) = (width as i32, height as i32);

    solid_border(&mut grid);
    fill_rect(&mut grid, 1, 1, w - 2, 1, Tile::Solid);
    fill_rect(&mut grid, 1, h - 2, w - 2, h - 2, Tile::Solid);
    let walk = walkway_row(height);
    fill_rect(&mut grid, 2, walk, w - 3, walk, Tile::Solid);

    for _ in 0..PLATFORM_COUNT {
        let len = rng.int(4, 10);
        let x = rng.int(2, (w - 2 - len).max(2));
        let y = rng.int(3, (h - 4).max(3));
        fill_rect(&mut grid, x, y, x + len - 1, y, Tile::Solid);
    }

    // Each exit runs a one-tile line to the standing row above the walkway.
    let stand = walk - 1;
    for aperture in apertures {
        let depth = if aperture.edge == Edge::Top { 2 } else { 1 };
        aperture.carve(&mut grid, depth);
        let (ix, iy) = aperture.inside(&grid);
        let target = match aperture.edge {
            Edge::Left | Edge::Right => (ix.clamp(2, (w - 3).max(2)), stand),
            Edge::Top | Edge::Bottom => (ix, stand),
        };
        carve_line(&mut grid, (ix, iy), target, 0, aperture.edge.is_horizontal());
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_and_walkway() {
        let grid = fill(30, 20, &[], &mut SeededRng::new("shell"));
        let walk = walkway_row(20);
        assert_eq!(walk, 12);
        for x in 0..30 {
            assert!(grid.is_solid(x, 0) && grid.is_solid(x, 1));
            assert!(grid.is_solid(x, 18) && grid.is_solid(x, 19));
        }
        for x in 2..=27 {
            assert!(grid.is_solid(x, walk));
        }
    }

    #[test]
    fn side_exits_reach_the_walkway() {
        let aperture = Aperture {
            edge: Edge::Left,
            start: 4,
            end: 6,
        };
        let grid = fill(30, 20, &[aperture], &mut SeededRng::new("side"));
        assert!(grid.is_empty(0, 5));
        // The line drops from (1,5) along column 2 to the standing row.
        assert!(grid.is_empty(1, 5));
        assert!(grid.is_empty(2, 11));
    }

    #[test]
    fn ceiling_exits_cut_through_the_ceiling_row() {
        let aperture = Aperture {
            edge: Edge::Top,
            start: 14,
            end: 16,
        };
        let grid = fill(30, 20, &[aperture], &mut SeededRng::new("top"));
        assert!(grid.is_empty(15, 0) && grid.is_empty(15, 1));
        assert!(grid.is_empty(15, 11));
    }
}
