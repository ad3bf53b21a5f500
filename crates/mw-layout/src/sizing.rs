//! Required room footprints in grid units.
//!
//! A room's footprint must leave room for its exit neighbors: two or more
//! neighbors on one side are stacked along that side, so the side has to be
//! at least as long as their sum. The computation is a memoised depth-first
//! walk over the exit graph. A room's full footprint is summed into at most
//! one parent; later parents count it at its base size, so on looped graphs
//! footprints grow with the room count instead of with the number of paths.

use std::collections::{BTreeMap, BTreeSet};

use mw_core::{Edge, WorldData, WorldMapData};
use serde::{Deserialize, Serialize};

/// Tiles per grid unit on each axis.
pub const GRID_UNIT: usize = 9;

/// A footprint in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Columns.
    pub w: i32,
    /// Rows.
    pub h: i32,
}

impl GridSize {
    /// Creates a size.
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// A room's own footprint: its tile size rounded up to whole units, at least 1.
pub fn base_size(room: &WorldMapData) -> GridSize {
    let (w, h) = room.world.tile_dims();
    let units = |tiles: usize| tiles.div_ceil(GRID_UNIT).max(1) as i32;
    GridSize::new(units(w), units(h))
}

/// Exit neighbors of a room grouped by wall, first exit per target, in exit
/// order. Targets missing from the world and self-links are skipped.
pub fn neighbors_by_edge<'a>(world: &'a WorldData, room: &'a WorldMapData) -> BTreeMap<Edge, Vec<&'a str>> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out: BTreeMap<Edge, Vec<&str>> = BTreeMap::new();
    for exit in &room.exits {
        let target = exit.target_map_id.as_str();
        if target == room.id || !world.maps.contains_key(target) || !seen.insert(target) {
            continue;
        }
        out.entry(exit.edge).or_default().push(target);
    }
    out
}

/// Memo and recursion stack for one sizing run.
#[derive(Debug)]
pub struct SizingContext<'a> {
    world: &'a WorldData,
    memo: BTreeMap<String, GridSize>,
    stack: BTreeSet<String>,
    claimed: BTreeSet<String>,
}

impl<'a> SizingContext<'a> {
    /// A fresh context over `world`.
    pub fn new(world: &'a WorldData) -> Self {
        Self {
            world,
            memo: BTreeMap::new(),
            stack: BTreeSet::new(),
            claimed: BTreeSet::new(),
        }
    }

    /// Required footprint of `id`, or `None` for an unknown room.
    ///
    /// A room already on the recursion stack stands in with its base size, so
    /// on cyclic exit graphs the result depends on which room the walk
    /// entered first.
    pub fn required(&mut self, id: &str) -> Option<GridSize> {
        if let Some(size) = self.memo.get(id) {
            return Some(*size);
        }
        let world = self.world;
        let room = world.maps.get(id)?;
        let base = base_size(room);
        if self.stack.contains(id) {
            return Some(base);
        }

        self.stack.insert(id.to_string());
        let groups = neighbors_by_edge(world, room);
        let mut size = base;
        for (edge, targets) in &groups {
            if targets.len() < 2 {
                continue;
            }
            let sizes: Vec<GridSize> = targets.iter().filter_map(|t| self.stacked(t)).collect();
            if edge.is_horizontal() {
                size.h = size.h.max(sizes.iter().fold(0, |acc, s| acc.saturating_add(s.h)));
            } else {
                size.w = size.w.max(sizes.iter().fold(0, |acc, s| acc.saturating_add(s.w)));
            }
        }
        let vertical = groups.keys().any(|e| !e.is_horizontal());
        let horizontal = groups.keys().any(|e| e.is_horizontal());
        if vertical && horizontal {
            size.h = size.h.saturating_add(1);
        }
        self.stack.remove(id);

        self.memo.insert(id.to_string(), size);
        Some(size)
    }

    /// What `id` adds to a stack of neighbors: its required footprint the
    /// first time, its base size afterwards.
    fn stacked(&mut self, id: &str) -> Option<GridSize> {
        if self.claimed.contains(id) || self.stack.contains(id) {
            return self.world.maps.get(id).map(base_size);
        }
        let size = self.required(id)?;
        self.claimed.insert(id.to_string());
        Some(size)
    }

    /// Every memoised footprint.
    pub fn into_sizes(self) -> BTreeMap<String, GridSize> {
        self.memo
    }
}

/// Required footprint of every room, walking rooms in id order.
pub fn compute_required_sizes(world: &WorldData) -> BTreeMap<String, GridSize> {
    let mut ctx = SizingContext::new(world);
    for id in world.maps.keys() {
        ctx.required(id);
    }
    ctx.into_sizes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{link, room, world_of};

    #[test]
    fn base_size_rounds_up() {
        assert_eq!(base_size(&room("a", 25, 10)), GridSize::new(3, 2));
        assert_eq!(base_size(&room("a", 9, 9)), GridSize::new(1, 1));
        assert_eq!(base_size(&room("a", 0, 0)), GridSize::new(1, 1));
    }

    #[test]
    fn a_lone_neighbor_does_not_enlarge() {
        let mut world = world_of(vec![room("a", 9, 9), room("b", 27, 27)]);
        link(&mut world, "a", Edge::Right, "b");
        let sizes = compute_required_sizes(&world);
        assert_eq!(sizes["a"], GridSize::new(1, 1));
        assert_eq!(sizes["b"], GridSize::new(3, 3));
    }

    #[test]
    fn stacked_neighbors_are_summed() {
        let mut world = world_of(vec![
            room("hub", 9, 9),
            room("b", 18, 18),
            room("c", 9, 27),
            room("d", 18, 9),
            room("e", 27, 9),
        ]);
        link(&mut world, "hub", Edge::Right, "b");
        link(&mut world, "hub", Edge::Right, "c");
        link(&mut world, "hub", Edge::Top, "d");
        link(&mut world, "hub", Edge::Top, "e");
        let sizes = compute_required_sizes(&world);
        // Height 2 + 3 for the right side plus the bridge row; width 2 + 3 on top.
        assert_eq!(sizes["hub"], GridSize::new(5, 6));
    }

    #[test]
    fn mixed_axes_add_a_bridge_row() {
        let mut world = world_of(vec![room("a", 9, 9), room("b", 9, 9), room("c", 9, 9)]);
        link(&mut world, "a", Edge::Right, "b");
        link(&mut world, "a", Edge::Bottom, "c");
        let sizes = compute_required_sizes(&world);
        assert_eq!(sizes["a"], GridSize::new(1, 2));
        assert_eq!(sizes["b"], GridSize::new(1, 1));
    }

    #[test]
    fn cycles_fall_back_to_base_size_on_the_stack() {
        // a stacks b and c on its right; c stacks a and b on its left. c is
        // sized while a is still on the stack, so a counts as 1x1 there.
        let mut world = world_of(vec![room("a", 9, 9), room("b", 9, 9), room("c", 9, 9)]);
        link(&mut world, "a", Edge::Right, "b");
        link(&mut world, "a", Edge::Right, "c");
        link(&mut world, "b", Edge::Right, "c");
        let sizes = compute_required_sizes(&world);
        assert_eq!(sizes["b"], GridSize::new(1, 1));
        assert_eq!(sizes["c"], GridSize::new(1, 2));
        assert_eq!(sizes["a"], GridSize::new(1, 3));
    }

    #[test]
    fn shared_neighbors_count_in_full_only_once() {
        // r is stacked against both a's right wall and b's bottom wall.
        let mut world = world_of(vec![
            room("a", 9, 9),
            room("b", 9, 9),
            room("r", 9, 9),
            room("s", 9, 9),
            room("t", 9, 9),
            room("u", 9, 9),
            room("v", 9, 9),
        ]);
        link(&mut world, "a", Edge::Right, "r");
        link(&mut world, "a", Edge::Right, "u");
        link(&mut world, "b", Edge::Bottom, "r");
        link(&mut world, "b", Edge::Bottom, "v");
        link(&mut world, "r", Edge::Bottom, "s");
        link(&mut world, "r", Edge::Bottom, "t");
        let sizes = compute_required_sizes(&world);
        assert_eq!(sizes["r"], GridSize::new(2, 2));
        // a is sized first and takes r at its full height.
        assert_eq!(sizes["a"], GridSize::new(1, 3));
        // b only sees r's 1x1 base, so its bottom wall spans 1 + 1.
        assert_eq!(sizes["b"], GridSize::new(2, 1));
    }

    #[test]
    fn looped_worlds_grow_polynomially() {
        use mw_gen::{ConvertOptions, GraphOptions, convert_to_world_data, generate_world_graph};

        let graph = generate_world_graph(
            &GraphOptions::default()
                .with_seed("dense")
                .with_room_count(320)
                .with_loops_ratio(1.0)
                .with_branch_factor(2.0),
        );
        let world = convert_to_world_data(&graph, &ConvertOptions::default());
        let sizes = compute_required_sizes(&world);
        assert_eq!(sizes.len(), world.maps.len());
        // Each room feeds its full footprint to at most one parent and its
        // base size to the rest, which caps every side polynomially.
        let max_base = world
            .maps
            .values()
            .map(|r| {
                let b = base_size(r);
                b.w.max(b.h)
            })
            .max()
            .unwrap_or(1);
        let bound = (world.exit_count() + world.maps.len()) as i32 * (max_base + 1);
        for size in sizes.values() {
            assert!(size.w >= 1 && size.w <= bound, "{size:?}");
            assert!(size.h >= 1 && size.h <= bound, "{size:?}");
        }
    }

    #[test]
    fn unknown_rooms_have_no_size() {
        let world = world_of(vec![room("a", 9, 9)]);
        let mut ctx = SizingContext::new(&world);
        assert_eq!(ctx.required("ghost"), None);
        assert_eq!(ctx.required("a"), Some(GridSize::new(1, 1)));
    }
}
