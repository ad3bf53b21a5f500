//! Post-fill repair passes shared by every algorithm.
//!
//! The passes run in a fixed order and together guarantee two properties of
//! the returned grid: no row or column contains a `solid, empty, solid`
//! triple, and every empty cell is reachable from the center.
//!
//! Sealing ends with no gaps. The backbone only carves shapes at least two
//! tiles thick along both axes (border apertures are thin only across the
//! wall, where no triple can sit), so it cannot open a new gap. The final
//! flood only fills cells that share no side with a reached empty cell, so it
//! cannot open one either.

use mw_core::{Tile, TileGrid};

use crate::analysis::{flood_from, single_tile_gaps};
use crate::grid::{Aperture, carve_interior_rect};

/// Most gap-widening passes before falling back to sealing.
pub const MAX_WIDEN_PASSES: usize = 3;

/// Run every repair pass in order.
pub fn repair(grid: &mut TileGrid, apertures: &[Aperture]) {
    let widened = widen_gaps(grid);
    let sealed = seal_gaps(grid);
    let rebuilt = backbone(grid, apertures);
    let culled = connect(grid, apertures);
    tracing::trace!(
        target: "mapweaver::tiles",
        widened,
        sealed,
        rebuilt,
        culled,
        "room.repaired"
    );
}

/// One widening pass. Each gap opens the solid on one side when the cell
/// beyond it is empty, otherwise the gap itself is sealed. Returns the number
/// of cells changed.
fn widen_pass(grid: &mut TileGrid) -> usize {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut changed = 0;
    for y in 0..h {
        for x in 0..w {
            for (dx, dy) in [(1, 0), (0, 1)] {
                if !grid.is_empty(x, y)
                    || !grid.in_bounds(x - dx, y - dy)
                    || !grid.in_bounds(x + dx, y + dy)
                    || !grid.is_solid(x - dx, y - dy)
                    || !grid.is_solid(x + dx, y + dy)
                {
                    continue;
                }
                if grid.is_empty(x + 2 * dx, y + 2 * dy) {
                    grid.set(x + dx, y + dy, Tile::Empty);
                } else if grid.is_empty(x - 2 * dx, y - 2 * dy) {
                    grid.set(x - dx, y - dy, Tile::Empty);
                } else {
                    grid.set(x, y, Tile::Solid);
                }
                changed += 1;
            }
        }
    }
    changed
}

/// Widen single-tile gaps, at most [`MAX_WIDEN_PASSES`] passes, stopping at
/// the first pass that changes nothing. Gaps may remain afterwards.
pub fn widen_gaps(grid: &mut TileGrid) -> usize {
    let mut total = 0;
    for _ in 0..MAX_WIDEN_PASSES {
        let changed = widen_pass(grid);
        total += changed;
        if changed == 0 {
            break;
        }
    }
    total
}

/// Fill every remaining single-tile gap until none are left.
pub fn seal_gaps(grid: &mut TileGrid) -> usize {
    let limit = grid.width() * grid.height();
    let mut total = 0;
    for _ in 0..=limit {
        let gaps = single_tile_gaps(grid);
        if gaps.is_empty() {
            break;
        }
        total += gaps.len();
        for (x, y) in gaps {
            grid.set(x, y, Tile::Solid);
        }
    }
    total
}

/// Open a hub at a solid center, then reopen every exit that is blocked or
/// cut off from the center with a three-wide corridor. Returns the number of
/// exits rebuilt.
pub fn backbone(grid: &mut TileGrid, apertures: &[Aperture]) -> usize {
    let (cx, cy) = grid.center();
    if grid.is_solid(cx, cy) {
        carve_interior_rect(grid, cx - 1, cy - 1, cx + 1, cy + 1);
    }

    let mut rebuilt = 0;
    for aperture in apertures {
        let reached = flood_from(grid, &[(cx, cy)]);
        let open = aperture
            .cells(grid)
            .iter()
            .all(|cell| reached.contains(cell));
        if open {
            continue;
        }
        aperture.carve(grid, 1);
        let mid = aperture.mid();
        if aperture.edge.is_horizontal() {
            // Along the row to the center column, then along that column.
            let (x0, x1) = corridor_span(aperture, grid, cx);
            carve_interior_rect(grid, x0, mid - 1, x1, mid + 1);
            carve_interior_rect(grid, cx - 1, mid.min(cy) - 1, cx + 1, mid.max(cy) + 1);
        } else {
            let (y0, y1) = corridor_span(aperture, grid, cy);
            carve_interior_rect(grid, mid - 1, y0, mid + 1, y1);
            carve_interior_rect(grid, mid.min(cx) - 1, cy - 1, mid.max(cx) + 1, cy + 1);
        }
        rebuilt += 1;
    }
    rebuilt
}

/// Inclusive span along the exit's inward axis from just inside the wall to
/// one past the center line.
fn corridor_span(aperture: &Aperture, grid: &TileGrid, center: i32) -> (i32, i32) {
    let (ix, iy) = aperture.inside(grid);
    let from = if aperture.edge.is_horizontal() { ix } else { iy };
    (from.min(center - 1), from.max(center + 1))
}

/// Fill every empty cell not reachable from the center, an exit midpoint, or
/// the cell just inside an exit midpoint. Returns the number of cells filled.
pub fn connect(grid: &mut TileGrid, apertures: &[Aperture]) -> usize {
    let mut seeds = vec![grid.center()];
    for aperture in apertures {
        seeds.push(aperture.midpoint(grid));
        seeds.push(aperture.inside(grid));
    }
    let reached = flood_from(grid, &seeds);
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut filled = 0;
    for y in 0..h {
        for x in 0..w {
            if grid.is_empty(x, y) && !reached.contains(&(x, y)) {
                grid.set(x, y, Tile::Solid);
                filled += 1;
            }
        }
    }
    filled
}
