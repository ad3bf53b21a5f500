//! Organic caverns grown by cellular automata.

use mw_core::{SeededRng, Tile, TileGrid};

use crate::grid::{Aperture, carve_line, carve_rect, fill_rect, solid_border};

/// Chance of a solid cell in the initial noise.
pub const INITIAL_SOLID: f64 = 0.55;
/// Smoothing iterations before exits are carved.
pub const SMOOTHING_ITERATIONS: usize = 5;
/// Density below which reinforcement ribs are added.
pub const MIN_DENSITY: f64 = 0.35;
/// Row spacing of reinforcement ribs.
pub const RIB_SPACING: usize = 5;
/// Chance of each rib cell being solid.
pub const RIB_CHANCE: f64 = 0.65;

fn solid_neighbors(grid: &TileGrid, x: i32, y: i32) -> usize {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if (dx, dy) != (0, 0) && grid.is_solid(x + dx, y + dy) {
                count += 1;
            }
        }
    }
    count
}

/// One automaton step: more than four solid neighbors makes a cell solid,
/// exactly four keeps it, fewer clears it. The border stays solid.
pub fn smooth(grid: &TileGrid) -> TileGrid {
    let mut next = grid.clone();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let tile = match solid_neighbors(grid, x, y) {
                n if n > 4 => Tile::Solid,
                4 => grid.get(x, y).unwrap_or(Tile::Solid),
                _ => Tile::Empty,
            };
            next.set(x, y, tile);
        }
    }
    solid_border(&mut next);
    next
}

/// Fill a cave room.
pub fn fill(width: usize, height: usize, apertures: &[Aperture], rng: &mut SeededRng) -> TileGrid {
    let mut grid = TileGrid::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if rng.chance(INITIAL_SOLID) {
                grid.set(x, y, Tile::Solid);
            }
        }
    }
    solid_border(&mut grid);
    for _ in 0..SMOOTHING_ITERATIONS {
        grid = smooth(&grid);
    }

    let (w, h) = (width as i32, height as i32);
    let band = ((height as f64 * 0.05).ceil() as i32).max(1);
    fill_rect(&mut grid, 0, h - band, w - 1, h - 1, Tile::Solid);

    let (cx, cy) = grid.center();
    for aperture in apertures {
        aperture.carve(&mut grid, 1);
        let inside = aperture.inside(&grid);
        carve_line(&mut grid, inside, (cx, cy), 0, aperture.edge.is_horizontal());
    }
    carve_rect(&mut grid, cx - 1, cy - 1, cx + 1, cy + 1);

    if grid.solid_ratio() < MIN_DENSITY {
        for y in (RIB_SPACING as i32..h - 1).step_by(RIB_SPACING) {
            for x in 1..w - 1 {
                if rng.chance(RIB_CHANCE) {
                    grid.set(x, y, Tile::Solid);
                }
            }
        }
    }
    smooth(&grid)
}
