//! Generation-time grid placement.
//!
//! Rooms are placed one cell each on an unbounded integer grid by a
//! breadth-first walk from the start room. Deeper rooms go right, shallower
//! rooms go left, rooms of equal depth stack above and below.

use std::collections::{BTreeMap, HashSet, VecDeque};

use mw_core::{Edge, GridPos, WorldGraph};

/// Largest ring the spiral fallback searches before opening a fresh column.
pub const SPIRAL_RADIUS_CAP: i32 = 64;

/// Cells taken so far. Owned by a single placement run.
#[derive(Debug, Default)]
struct Occupancy {
    taken: HashSet<GridPos>,
    max_x: i32,
}

impl Occupancy {
    fn is_free(&self, pos: GridPos) -> bool {
        !self.taken.contains(&pos)
    }

    fn take(&mut self, pos: GridPos) {
        if self.taken.is_empty() || pos.x > self.max_x {
            self.max_x = pos.x;
        }
        self.taken.insert(pos);
    }

    /// First free candidate, else the nearest free cell around `candidates[0]`.
    fn claim(&mut self, candidates: &[GridPos]) -> GridPos {
        let pos = candidates
            .iter()
            .copied()
            .find(|p| self.is_free(*p))
            .or_else(|| candidates.first().and_then(|p| self.spiral(*p)))
            .unwrap_or_else(|| self.fresh_column(candidates.first().map_or(0, |p| p.y)));
        self.take(pos);
        pos
    }

    /// Nearest free cell in the smallest ring around `origin` that has one.
    fn spiral(&self, origin: GridPos) -> Option<GridPos> {
        (1..=SPIRAL_RADIUS_CAP).find_map(|r| {
            let mut best: Option<(i32, GridPos)> = None;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs().max(dy.abs()) != r {
                        continue;
                    }
                    let pos = GridPos::new(origin.x + dx, origin.y + dy);
                    let dist = dx * dx + dy * dy;
                    if self.is_free(pos) && best.is_none_or(|(d, _)| dist < d) {
                        best = Some((dist, pos));
                    }
                }
            }
            best.map(|(_, pos)| pos)
        })
    }

    fn fresh_column(&self, y: i32) -> GridPos {
        let x = if self.taken.is_empty() { 0 } else { self.max_x + 1 };
        GridPos::new(x, y)
    }
}

/// Preferred cells for the `k`-th neighbor in each direction class.
fn candidates(at: GridPos, depth: u32, neighbor_depth: u32, k: i32) -> Vec<GridPos> {
    use std::cmp::Ordering;
    match neighbor_depth.cmp(&depth) {
        Ordering::Greater => {
            let x = at.x + 1 + k;
            vec![GridPos::new(x, at.y), GridPos::new(x, at.y + 1), GridPos::new(x, at.y - 1)]
        }
        Ordering::Less => {
            let x = at.x - 1 - k;
            vec![GridPos::new(x, at.y), GridPos::new(x, at.y + 1), GridPos::new(x, at.y - 1)]
        }
        Ordering::Equal => {
            let step = k / 2 + 1;
            let y = if k % 2 == 0 { at.y - step } else { at.y + step };
            vec![GridPos::new(at.x, y)]
        }
    }
}

/// Assign every node of `graph` a unique grid cell.
///
/// The start room sits at the origin. Nodes not reachable from it are placed
/// as new roots in a fresh column, in node order.
pub fn place_rooms(graph: &WorldGraph) -> BTreeMap<String, GridPos> {
    let mut occupancy = Occupancy::default();
    let mut positions: BTreeMap<String, GridPos> = BTreeMap::new();

    let roots = graph
        .node(&graph.start)
        .into_iter()
        .chain(graph.nodes.iter());
    for root in roots {
        if positions.contains_key(&root.id) {
            continue;
        }
        let origin = if positions.is_empty() {
            GridPos::new(0, 0)
        } else {
            occupancy.fresh_column(0)
        };
        occupancy.take(origin);
        positions.insert(root.id.clone(), origin);

        let mut queue = VecDeque::from([root.id.as_str()]);
        while let Some(current) = queue.pop_front() {
            let Some(node) = graph.node(current) else {
                continue;
            };
            let at = positions[current];
            let (mut deeper, mut shallower, mut level) = (0, 0, 0);
            for next in graph.neighbors(current) {
                if positions.contains_key(next) {
                    continue;
                }
                let Some(neighbor) = graph.node(next) else {
                    continue;
                };
                let counter = match neighbor.depth.cmp(&node.depth) {
                    std::cmp::Ordering::Greater => &mut deeper,
                    std::cmp::Ordering::Less => &mut shallower,
                    std::cmp::Ordering::Equal => &mut level,
                };
                let pos = occupancy.claim(&candidates(at, node.depth, neighbor.depth, *counter));
                *counter += 1;
                positions.insert(next.to_string(), pos);
                queue.push_back(next);
            }
        }
    }
    positions
}

/// The wall of `from` facing `to`: the axis with the larger delta wins, ties
/// go horizontal.
pub fn edge_between(from: GridPos, to: GridPos) -> Edge {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() >= dy.abs() {
        if dx >= 0 { Edge::Right } else { Edge::Left }
    } else if dy > 0 {
        Edge::Bottom
    } else {
        Edge::Top
    }
}
