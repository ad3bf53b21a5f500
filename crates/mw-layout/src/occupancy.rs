//! Occupied grid rectangles for one layout run.

use mw_core::GridPos;

use crate::sizing::GridSize;

/// Rectangles of placed rooms. Every query costs one pass over the placed
/// rectangles, whatever their area.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    rects: Vec<(GridPos, GridSize)>,
    right_edge: Option<i32>,
}

impl Occupancy {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a `size` rectangle at `pos` touches no occupied cell.
    pub fn is_free(&self, pos: GridPos, size: GridSize) -> bool {
        self.rects.iter().all(|(p, s)| {
            pos.x.saturating_add(size.w) <= p.x
                || p.x.saturating_add(s.w) <= pos.x
                || pos.y.saturating_add(size.h) <= p.y
                || p.y.saturating_add(s.h) <= pos.y
        })
    }

    /// Mark a `size` rectangle at `pos` as taken.
    pub fn occupy(&mut self, pos: GridPos, size: GridSize) {
        self.rects.push((pos, size));
        let right = pos.x.saturating_add(size.w);
        self.right_edge = Some(self.right_edge.map_or(right, |r| r.max(right)));
    }

    /// First row below everything in columns `x..x + w`, or `None` if those
    /// columns are empty.
    pub fn low_water(&self, x: i32, w: i32) -> Option<i32> {
        self.rects
            .iter()
            .filter(|(p, s)| p.x < x.saturating_add(w) && x < p.x.saturating_add(s.w))
            .map(|(p, s)| p.y.saturating_add(s.h))
            .max()
    }

    /// First column right of every placed room (0 when nothing is placed).
    pub fn right_edge(&self) -> i32 {
        self.right_edge.unwrap_or(0)
    }

    /// Number of placed rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangles_block_each_other() {
        let mut occ = Occupancy::new();
        assert!(occ.is_empty());
        occ.occupy(GridPos::new(0, 0), GridSize::new(2, 3));
        assert_eq!(occ.len(), 1);
        assert!(!occ.is_free(GridPos::new(1, 2), GridSize::new(1, 1)));
        assert!(occ.is_free(GridPos::new(2, 0), GridSize::new(4, 4)));
        assert!(!occ.is_free(GridPos::new(-1, -1), GridSize::new(2, 2)));
        // Touching edges do not overlap.
        assert!(occ.is_free(GridPos::new(0, 3), GridSize::new(2, 1)));
        assert!(occ.is_free(GridPos::new(-2, 0), GridSize::new(2, 3)));
    }

    #[test]
    fn huge_rectangles_are_checked_without_walking_cells() {
        let mut occ = Occupancy::new();
        occ.occupy(GridPos::new(0, 0), GridSize::new(1, 1_000_000));
        occ.occupy(GridPos::new(5, 0), GridSize::new(1_000_000, 1));
        assert!(!occ.is_free(GridPos::new(-10, 999_999), GridSize::new(20, 20)));
        assert!(occ.is_free(GridPos::new(1, 1), GridSize::new(4, 999_999)));
        assert!(!occ.is_free(GridPos::new(1, 0), GridSize::new(i32::MAX, 1)));
        assert_eq!(occ.low_water(0, 4), Some(1_000_000));
        assert_eq!(occ.low_water(3, 4), Some(1));
        assert_eq!(occ.right_edge(), 1_000_005);
        assert_eq!(occ.len(), 2);
    }

    #[test]
    fn low_water_tracks_the_deepest_room_per_column() {
        let mut occ = Occupancy::new();
        occ.occupy(GridPos::new(0, 0), GridSize::new(2, 3));
        occ.occupy(GridPos::new(1, 5), GridSize::new(2, 1));
        assert_eq!(occ.low_water(0, 1), Some(3));
        assert_eq!(occ.low_water(0, 3), Some(6));
        assert_eq!(occ.low_water(5, 2), None);
        assert_eq!(occ.right_edge(), 3);
    }
}
