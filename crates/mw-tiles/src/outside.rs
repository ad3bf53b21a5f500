//! Open-air rooms: rolling ground with floating platforms.

use mw_core::{Edge, SeededRng, Tile, TileGrid};

use crate::grid::{Aperture, carve_rect, fill_rect};

/// Floating platforms scattered per room.
pub const PLATFORM_COUNT: usize = 8;
/// Depth of the well cleared under a ceiling exit.
pub const WELL_DEPTH: i32 = 4;
/// Most steps in the stair cut beside a floor exit.
pub const STAIR_STEPS: i32 = 4;
/// Width of one stair tread in tiles.
pub const STAIR_TREAD: i32 = 2;
/// Height of one stair riser in tiles.
pub const STAIR_RISE: i32 = 2;

/// Ground line per column: a ±1 random walk kept inside the middle 35% of
/// the room height.
pub fn terrain(width: usize, height: usize, rng: &mut SeededRng) -> Vec<i32> {
    let lo = (height as f64 * 0.325).floor() as i32;
    let hi = ((height as f64 * 0.675).ceil() as i32 - 1).max(lo);
    let mut ground = rng.int(lo, hi);
    (0..width)
        .map(|_| {
            ground = (ground + rng.int(-1, 1)).clamp(lo, hi);
            ground
        })
        .collect()
}

/// Fill an outside room.
pub fn fill(width: usize, height: usize, apertures: &[Aperture], rng: &mut SeededRng) -> TileGrid {
    let mut grid = TileGrid::new(width, height);
    let (w, h) = (width as i32, height as i32);

    let ground = terrain(width, height, rng);
    for (x, &top) in ground.iter().enumerate() {
        fill_rect(&mut grid, x as i32, top, x as i32, h - 1, Tile::Solid);
    }

    let sky = ((height as f64 * 0.65).floor() as i32).max(2);
    for _ in 0..PLATFORM_COUNT {
        let len = rng.int(3, 8);
        let x = rng.int(1, (w - 1 - len).max(1));
        let y = rng.int(1, sky - 1);
        fill_rect(&mut grid, x, y, x + len - 1, y, Tile::Solid);
    }

    for aperture in apertures {
        aperture.carve(&mut grid, 2);
        match aperture.edge {
            Edge::Bottom => {
                let surface = ground[aperture.start as usize..=aperture.end as usize]
                    .iter()
                    .copied()
                    .min()
                    .unwrap_or(h / 2);
                let top = (surface - 1).max(1);
                carve_rect(&mut grid, aperture.start, top, aperture.end, h - 1);
                carve_stair(&mut grid, &ground, aperture);
            }
            Edge::Top => {
                carve_rect(&mut grid, aperture.start, 0, aperture.end, WELL_DEPTH.min(h - 1));
            }
            Edge::Left | Edge::Right => {}
        }
    }
    grid
}

/// Cut a stair into the ground beside a floor exit's shaft, climbing from the
/// exit toward the middle of the room. Step `k` is `STAIR_TREAD` columns wide
/// with its tread `STAIR_RISE * (k + 1)` rows above the bottom border; the
/// stair ends where it meets the surface or the side wall.
fn carve_stair(grid: &mut TileGrid, ground: &[i32], aperture: &Aperture) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let (dir, side) = if aperture.mid() < w / 2 {
        (1, aperture.end)
    } else {
        (-1, aperture.start)
    };
    for k in 0..STAIR_STEPS {
        let tread = h - 1 - STAIR_RISE * (k + 1);
        let near = side + dir * (1 + STAIR_TREAD * k);
        let far = near + dir * (STAIR_TREAD - 1);
        let (lo, hi) = (near.min(far), near.max(far));
        if lo < 1 || hi > w - 2 {
            break;
        }
        let surface = (lo..=hi).map(|x| ground[x as usize]).min().unwrap_or(tread);
        if tread - 1 < surface {
            break;
        }
        carve_rect(grid, lo, surface, hi, tread - 1);
    }
}
