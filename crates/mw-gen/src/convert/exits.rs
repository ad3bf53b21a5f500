//! Exit zone construction.

use mw_core::{Edge, ExitZone, GridPos, RoomBounds};

/// Tiles spanned by a generated exit.
pub const EXIT_SPAN: usize = 3;

/// A neighbor as seen from one room: the wall it sits behind, its grid cell
/// and its id.
#[derive(Debug, Clone)]
pub struct Neighbor {
    /// Wall of this room facing the neighbor.
    pub edge: Edge,
    /// The neighbor's placement cell.
    pub pos: GridPos,
    /// The neighbor's room id.
    pub id: String,
}

/// Tile range `[start, end]` for an exit centred at `t` along an edge of
/// `len` tiles.
pub fn tile_range(t: f64, len: usize) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let center = ((t * len as f64).floor() as usize).min(len - 1);
    if len < EXIT_SPAN {
        return (0, len - 1);
    }
    let start = center.saturating_sub(1).min(len - EXIT_SPAN);
    (start, start + EXIT_SPAN - 1)
}

/// Build the exits of a room. Neighbors on the same wall are spread evenly
/// along it, ordered by their cross-axis grid coordinate and then id.
pub fn build_exits(bounds: &RoomBounds, neighbors: &[Neighbor]) -> Vec<ExitZone> {
    let (w_tiles, h_tiles) = bounds.tile_dims();
    let ts = bounds.tile_size;
    let mut exits = Vec::new();

    for edge in Edge::ALL {
        let mut group: Vec<&Neighbor> = neighbors.iter().filter(|n| n.edge == edge).collect();
        group.sort_by(|a, b| {
            let key = |n: &Neighbor| if edge.is_horizontal() { n.pos.y } else { n.pos.x };
            key(*a).cmp(&key(*b)).then_with(|| a.id.cmp(&b.id))
        });

        let len = if edge.is_horizontal() { h_tiles } else { w_tiles };
        let k = group.len();
        for (i, neighbor) in group.into_iter().enumerate() {
            let t = (i + 1) as f64 / (k + 1) as f64;
            let (start, end) = tile_range(t, len);
            let span = (end - start + 1) as u32 * ts;
            let along = start as u32 * ts;
            let (x, y, width, height) = match edge {
                Edge::Left => (0, along, ts, span),
                Edge::Right => (w_tiles.saturating_sub(1) as u32 * ts, along, ts, span),
                Edge::Top => (along, 0, span, ts),
                Edge::Bottom => (along, h_tiles.saturating_sub(1) as u32 * ts, span, ts),
            };
            let denom = len.max(1) as f64;
            exits.push(ExitZone {
                id: format!("exit_{edge}_{i}"),
                x,
                y,
                width,
                height,
                edge,
                edge_position: t,
                edge_start: start as f64 / denom,
                edge_end: (end + 1) as f64 / denom,
                tile_start: start,
                tile_end: end,
                target_map_id: neighbor.id.clone(),
            });
        }
    }
    exits
}
