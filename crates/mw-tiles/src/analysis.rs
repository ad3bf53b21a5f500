//! Read-only checks over tile grids.

use std::collections::{HashSet, VecDeque};

use mw_core::TileGrid;

/// Empty cells squeezed between two solid cells in a row or a column.
/// Each cell is reported once, in row-major order.
pub fn single_tile_gaps(grid: &TileGrid) -> Vec<(i32, i32)> {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut gaps = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if !grid.is_empty(x, y) {
                continue;
            }
            let horizontal = x > 0 && x < w - 1 && grid.is_solid(x - 1, y) && grid.is_solid(x + 1, y);
            let vertical = y > 0 && y < h - 1 && grid.is_solid(x, y - 1) && grid.is_solid(x, y + 1);
            if horizontal || vertical {
                gaps.push((x, y));
            }
        }
    }
    gaps
}

/// Empty cells reachable from any of `seeds` by 4-neighbour steps.
/// Seeds that are solid or out of bounds are ignored.
pub fn flood_from(grid: &TileGrid, seeds: &[(i32, i32)]) -> HashSet<(i32, i32)> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    for &seed in seeds {
        if grid.is_empty(seed.0, seed.1) && seen.insert(seed) {
            queue.push_back(seed);
        }
    }
    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let next = (x + dx, y + dy);
            if grid.is_empty(next.0, next.1) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Empty cells a flood from the grid center does not reach, in row-major order.
pub fn unreachable_empty_cells(grid: &TileGrid) -> Vec<(i32, i32)> {
    let reached = flood_from(grid, &[grid.center()]);
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| grid.is_empty(x, y) && !reached.contains(&(x, y)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_gaps_in_both_directions() {
        let grid = TileGrid::from_rows(&[
            vec![1, 1, 1, 1, 1],
            vec![1, 0, 1, 0, 0],
            vec![1, 1, 1, 0, 0],
        ]);
        assert_eq!(single_tile_gaps(&grid), vec![(1, 1)]);

        let grid = TileGrid::from_rows(&[vec![0, 1], vec![0, 0], vec![0, 1]]);
        assert_eq!(single_tile_gaps(&grid), vec![(1, 1)]);
    }

    #[test]
    fn edges_of_the_grid_do_not_count_as_walls() {
        let grid = TileGrid::from_rows(&[vec![0, 1, 0], vec![1, 1, 1]]);
        assert!(single_tile_gaps(&grid).is_empty());
    }

    #[test]
    fn flood_respects_walls() {
        let grid = TileGrid::from_rows(&[
            vec![0, 0, 1, 0],
            vec![0, 0, 1, 0],
            vec![1, 1, 1, 0],
        ]);
        let reached = flood_from(&grid, &[(0, 0), (9, 9), (2, 0)]);
        assert_eq!(reached.len(), 4);
        assert!(!reached.contains(&(3, 0)));
    }

    #[test]
    fn unreachable_cells_are_listed() {
        let grid = TileGrid::from_rows(&[
            vec![0, 1, 1, 1, 1],
            vec![1, 1, 0, 0, 1],
            vec![1, 1, 0, 0, 1],
            vec![1, 1, 1, 1, 1],
        ]);
        assert_eq!(unreachable_empty_cells(&grid), vec![(0, 0)]);
    }
}
