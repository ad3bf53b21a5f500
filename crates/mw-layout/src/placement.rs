//! Breadth-first packing of room footprints.

use std::collections::{BTreeMap, VecDeque};

use mw_core::{Edge, GridPos, WorldData};
use serde::{Deserialize, Serialize};

use crate::occupancy::Occupancy;
use crate::sizing::{GridSize, compute_required_sizes, neighbors_by_edge};

/// Furthest the perpendicular search moves a room or sibling group.
pub const SEARCH_RADIUS: i32 = 64;

/// Packed room rectangles in grid units.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldLayout {
    /// Top-left cell of each room. The bounding box starts at `(0, 0)`.
    pub positions: BTreeMap<String, GridPos>,
    /// Footprint of each room.
    pub sizes: BTreeMap<String, GridSize>,
    /// Width of the bounding box.
    pub total_width: i32,
    /// Height of the bounding box.
    pub total_height: i32,
}

impl WorldLayout {
    /// Pairs of rooms whose rectangles intersect, in id order.
    pub fn overlaps(&self) -> Vec<(String, String)> {
        let rects: Vec<(&String, GridPos, GridSize)> = self
            .positions
            .iter()
            .filter_map(|(id, pos)| self.sizes.get(id).map(|size| (id, *pos, *size)))
            .collect();
        let mut out = Vec::new();
        for (i, (a, pa, sa)) in rects.iter().enumerate() {
            for (b, pb, sb) in rects.iter().skip(i + 1) {
                let apart = pa.x + sa.w <= pb.x
                    || pb.x + sb.w <= pa.x
                    || pa.y + sa.h <= pb.y
                    || pb.y + sb.h <= pa.y;
                if !apart {
                    out.push(((*a).clone(), (*b).clone()));
                }
            }
        }
        out
    }
}

/// Column offsets for the siblings placed on one room's right side. A
/// sibling with an exit to a later sibling pushes it at least one column
/// further right, two when that exit is on its own right wall. Constraints
/// are relaxed `siblings - 1` times.
pub fn sibling_offsets(world: &WorldData, siblings: &[&str]) -> Vec<i32> {
    let mut constraints = Vec::new();
    for (a, id) in siblings.iter().enumerate() {
        let Some(room) = world.maps.get(*id) else {
            continue;
        };
        for exit in &room.exits {
            let later = siblings
                .iter()
                .skip(a + 1)
                .position(|s| *s == exit.target_map_id);
            if let Some(offset) = later {
                let gap = if exit.edge == Edge::Right { 2 } else { 1 };
                constraints.push((a, a + 1 + offset, gap));
            }
        }
    }

    let mut offsets = vec![0; siblings.len()];
    for _ in 0..siblings.len().saturating_sub(1) {
        for &(a, b, gap) in &constraints {
            offsets[b] = offsets[b].max(offsets[a] + gap);
        }
    }
    offsets
}

/// One packing run.
struct Packer<'a> {
    sizes: &'a BTreeMap<String, GridSize>,
    occupancy: Occupancy,
    positions: BTreeMap<String, GridPos>,
}

impl Packer<'_> {
    fn size(&self, id: &str) -> GridSize {
        self.sizes.get(id).copied().unwrap_or(GridSize::new(1, 1))
    }

    fn place(&mut self, id: &str, pos: GridPos) {
        let size = self.size(id);
        self.occupancy.occupy(pos, size);
        self.positions.insert(id.to_string(), pos);
    }

    /// Below everything in the preferred columns, else a fresh column.
    fn fallback(&self, preferred: GridPos, size: GridSize) -> GridPos {
        if let Some(y) = self.occupancy.low_water(preferred.x, size.w) {
            let below = GridPos::new(preferred.x, y);
            if self.occupancy.is_free(below, size) {
                return below;
            }
        }
        GridPos::new(self.occupancy.right_edge(), preferred.y)
    }

    /// Search outward from `origin` along one axis for a free `size` slot.
    fn search(&self, origin: GridPos, size: GridSize, along_y: bool) -> Option<GridPos> {
        (0..=SEARCH_RADIUS).find_map(|r| {
            let steps = [r, -r];
            steps.iter().take(if r == 0 { 1 } else { 2 }).find_map(|&d| {
                let pos = if along_y {
                    GridPos::new(origin.x, origin.y + d)
                } else {
                    GridPos::new(origin.x + d, origin.y)
                };
                self.occupancy.is_free(pos, size).then_some(pos)
            })
        })
    }

    fn place_right(&mut self, world: &WorldData, at: GridPos, own: GridSize, siblings: &[&str]) {
        let offsets = sibling_offsets(world, siblings);
        for (id, offset) in siblings.iter().zip(offsets) {
            let size = self.size(id);
            let preferred = GridPos::new(at.x + own.w + offset, at.y);
            let pos = self
                .search(preferred, size, true)
                .unwrap_or_else(|| self.fallback(preferred, size));
            self.place(id, pos);
        }
    }

    /// Fit the whole group against one wall, sliding it along the wall until
    /// its bounding box is free, then lay the members side by side.
    fn place_group(&mut self, edge: Edge, at: GridPos, own: GridSize, siblings: &[&str]) {
        let sizes: Vec<GridSize> = siblings.iter().map(|id| self.size(id)).collect();
        let stacked_vertically = edge.is_horizontal();
        let group = if stacked_vertically {
            GridSize::new(
                sizes.iter().map(|s| s.w).max().unwrap_or(1),
                sizes.iter().map(|s| s.h).sum(),
            )
        } else {
            GridSize::new(
                sizes.iter().map(|s| s.w).sum(),
                sizes.iter().map(|s| s.h).max().unwrap_or(1),
            )
        };
        let anchor = match edge {
            Edge::Left => GridPos::new(at.x - group.w, at.y),
            Edge::Right => GridPos::new(at.x + own.w, at.y),
            Edge::Top => GridPos::new(at.x, at.y - group.h),
            Edge::Bottom => GridPos::new(at.x, at.y + own.h),
        };

        match self.search(anchor, group, stacked_vertically) {
            Some(origin) => {
                let mut cursor = 0;
                for (id, size) in siblings.iter().zip(&sizes) {
                    let pos = match edge {
                        Edge::Left => GridPos::new(at.x - size.w, origin.y + cursor),
                        Edge::Right => GridPos::new(origin.x, origin.y + cursor),
                        Edge::Top => GridPos::new(origin.x + cursor, at.y - size.h),
                        Edge::Bottom => GridPos::new(origin.x + cursor, origin.y),
                    };
                    cursor += if stacked_vertically { size.h } else { size.w };
                    self.place(id, pos);
                }
            }
            None => {
                for (id, size) in siblings.iter().zip(&sizes) {
                    let pos = self.fallback(anchor, *size);
                    self.place(id, pos);
                }
            }
        }
    }
}

/// Pack every room of `world` onto a non-overlapping grid.
///
/// The walk starts at the starting map and follows exits breadth-first;
/// rooms it never reaches become new roots in id order, each in a fresh
/// column.
pub fn calculate_layout(world: &WorldData) -> WorldLayout {
    let sizes = compute_required_sizes(world);
    let mut packer = Packer {
        sizes: &sizes,
        occupancy: Occupancy::new(),
        positions: BTreeMap::new(),
    };

    let roots = world
        .maps
        .get_key_value(&world.starting_map)
        .into_iter()
        .chain(world.maps.iter());
    for (root, _) in roots {
        if packer.positions.contains_key(root) {
            continue;
        }
        let origin = if packer.occupancy.is_empty() {
            GridPos::new(0, 0)
        } else {
            GridPos::new(packer.occupancy.right_edge(), 0)
        };
        packer.place(root, origin);

        let mut queue = VecDeque::from([root.as_str()]);
        while let Some(current) = queue.pop_front() {
            let Some(room) = world.maps.get(current) else {
                continue;
            };
            let at = packer.positions[current];
            let own = packer.size(current);
            for (edge, targets) in neighbors_by_edge(world, room) {
                let fresh: Vec<&str> = targets
                    .into_iter()
                    .filter(|t| !packer.positions.contains_key(*t))
                    .collect();
                if fresh.is_empty() {
                    continue;
                }
                if edge == Edge::Right {
                    packer.place_right(world, at, own, &fresh);
                } else {
                    packer.place_group(edge, at, own, &fresh);
                }
                queue.extend(fresh);
            }
        }
    }

    let mut positions = packer.positions;
    let min_x = positions.values().map(|p| p.x).min().unwrap_or(0);
    let min_y = positions.values().map(|p| p.y).min().unwrap_or(0);
    let (mut total_width, mut total_height) = (0, 0);
    for (id, pos) in positions.iter_mut() {
        *pos = GridPos::new(pos.x - min_x, pos.y - min_y);
        let size = sizes.get(id).copied().unwrap_or(GridSize::new(1, 1));
        total_width = total_width.max(pos.x + size.w);
        total_height = total_height.max(pos.y + size.h);
    }

    tracing::debug!(
        target: "mapweaver::layout",
        rooms = positions.len(),
        total_width,
        total_height,
        "layout.packed"
    );
    WorldLayout {
        positions,
        sizes,
        total_width,
        total_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{link, one_way, room, world_of};

    #[test]
    fn single_room_sits_at_the_origin() {
        let world = world_of(vec![room("a", 25, 10)]);
        let layout = calculate_layout(&world);
        assert_eq!(layout.positions["a"], GridPos::new(0, 0));
        assert_eq!((layout.total_width, layout.total_height), (3, 2));
    }

    #[test]
    fn right_neighbors_go_right() {
        let mut world = world_of(vec![room("a", 9, 9), room("b", 9, 9)]);
        link(&mut world, "a", Edge::Right, "b");
        let layout = calculate_layout(&world);
        assert_eq!(layout.positions["a"], GridPos::new(0, 0));
        assert_eq!(layout.positions["b"], GridPos::new(1, 0));
    }

    #[test]
    fn left_and_top_groups_are_normalized() {
        let mut world = world_of(vec![room("a", 9, 9), room("l", 9, 9), room("t", 18, 9)]);
        link(&mut world, "a", Edge::Left, "l");
        link(&mut world, "a", Edge::Top, "t");
        let layout = calculate_layout(&world);
        // a is 1x2 (bridge row); l sits left of it, t above it.
        assert_eq!(layout.positions["a"], GridPos::new(1, 1));
        assert_eq!(layout.positions["l"], GridPos::new(0, 1));
        assert_eq!(layout.positions["t"], GridPos::new(1, 0));
        assert!(layout.overlaps().is_empty());
    }

    #[test]
    fn stacked_bottom_neighbors_sit_side_by_side() {
        let mut world = world_of(vec![room("a", 27, 9), room("b", 9, 9), room("c", 9, 9)]);
        link(&mut world, "a", Edge::Bottom, "b");
        link(&mut world, "a", Edge::Bottom, "c");
        let layout = calculate_layout(&world);
        assert_eq!(layout.positions["b"], GridPos::new(0, 1));
        assert_eq!(layout.positions["c"], GridPos::new(1, 1));
    }

    #[test]
    fn cross_linked_right_siblings_are_staggered() {
        let mut world = world_of(vec![room("a", 9, 9), room("b", 9, 9), room("c", 9, 9)]);
        link(&mut world, "a", Edge::Right, "b");
        link(&mut world, "a", Edge::Right, "c");
        link(&mut world, "b", Edge::Right, "c");
        assert_eq!(sibling_offsets(&world, &["b", "c"]), vec![0, 2]);
        assert_eq!(sibling_offsets(&world, &["c", "b"]), vec![0, 1]);

        let layout = calculate_layout(&world);
        assert!(layout.positions["c"].x >= layout.positions["b"].x + 2);
        assert!(layout.overlaps().is_empty());
    }

    #[test]
    fn offsets_follow_the_longest_chain() {
        let mut world = world_of(vec![room("p", 9, 9), room("x", 9, 9), room("y", 9, 9), room("z", 9, 9)]);
        link(&mut world, "x", Edge::Bottom, "y");
        link(&mut world, "y", Edge::Right, "z");
        link(&mut world, "x", Edge::Right, "z");
        assert_eq!(sibling_offsets(&world, &["x", "y", "z"]), vec![0, 1, 3]);
    }

    #[test]
    fn exits_back_to_earlier_siblings_are_ignored() {
        let mut world = world_of(vec![room("b", 9, 9), room("c", 9, 9)]);
        one_way(&mut world, "c", Edge::Right, "b");
        assert_eq!(sibling_offsets(&world, &["b", "c"]), vec![0, 0]);
        assert_eq!(sibling_offsets(&world, &["c", "b"]), vec![0, 2]);

        one_way(&mut world, "c", Edge::Top, "b");
        // Two forward exits to the same sibling: the wider gap wins.
        assert_eq!(sibling_offsets(&world, &["c", "b"]), vec![0, 2]);
        assert_eq!(sibling_offsets(&world, &["b", "c"]), vec![0, 0]);
    }

    #[test]
    fn unreachable_rooms_become_new_roots() {
        let mut world = world_of(vec![room("a", 9, 9), room("b", 9, 9), room("island", 18, 9)]);
        link(&mut world, "a", Edge::Right, "b");
        let layout = calculate_layout(&world);
        assert_eq!(layout.positions["island"], GridPos::new(2, 0));
        assert_eq!(layout.total_width, 4);
    }

    #[test]
    fn overlaps_are_reported() {
        let mut layout = WorldLayout::default();
        layout.positions.insert("a".into(), GridPos::new(0, 0));
        layout.positions.insert("b".into(), GridPos::new(1, 1));
        layout.positions.insert("c".into(), GridPos::new(2, 0));
        layout.sizes.insert("a".into(), GridSize::new(2, 2));
        layout.sizes.insert("b".into(), GridSize::new(1, 1));
        layout.sizes.insert("c".into(), GridSize::new(1, 1));
        assert_eq!(layout.overlaps(), vec![("a".to_string(), "b".to_string())]);
    }
}
