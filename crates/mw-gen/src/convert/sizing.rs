//! Per-room tile dimensions.

use mw_core::{Edge, SeededRng};

/// Base room width in tiles.
pub const BASE_WIDTH: u32 = 25;
/// Base room height in tiles.
pub const BASE_HEIGHT: u32 = 10;
/// Smallest growth step in tiles.
pub const MIN_INCREMENT: i32 = 10;
/// Largest growth step in tiles.
pub const MAX_INCREMENT: i32 = 25;

/// Room size in tiles, given the walls its neighbors sit on (one entry per
/// neighbor, in neighbor order).
///
/// Opposite-wall pairs stretch the axis between them. Each neighbor on the
/// ceiling or floor then widens the room, and each neighbor on a side wall
/// makes it taller.
pub fn room_size(world_seed: &str, room_id: &str, neighbor_edges: &[Edge]) -> (u32, u32) {
    let mut rng = SeededRng::new(&format!("{world_seed}-roomsize-{room_id}"));
    let mut step = || rng.int(MIN_INCREMENT, MAX_INCREMENT) as u32;

    let has = |edge: Edge| neighbor_edges.contains(&edge);
    let mut width = BASE_WIDTH;
    let mut height = BASE_HEIGHT;
    if has(Edge::Top) && has(Edge::Bottom) {
        height += step();
    }
    if has(Edge::Left) && has(Edge::Right) {
        width += step();
    }
    for edge in neighbor_edges {
        match edge {
            Edge::Top | Edge::Bottom => width += step(),
            Edge::Left | Edge::Right => height += step(),
        }
    }
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_steps(extra: u32, steps: u32) -> bool {
        (MIN_INCREMENT as u32 * steps..=MAX_INCREMENT as u32 * steps).contains(&extra)
    }

    #[test]
    fn isolated_room_keeps_base_size() {
        assert_eq!(room_size("s", "room_1", &[]), (BASE_WIDTH, BASE_HEIGHT));
    }

    #[test]
    fn side_neighbors_make_rooms_taller() {
        let (w, h) = room_size("s", "room_1", &[Edge::Right]);
        assert_eq!(w, BASE_WIDTH);
        assert!(in_steps(h - BASE_HEIGHT, 1));
    }

    #[test]
    fn vertical_neighbors_make_rooms_wider() {
        let (w, h) = room_size("s", "room_1", &[Edge::Bottom]);
        assert_eq!(h, BASE_HEIGHT);
        assert!(in_steps(w - BASE_WIDTH, 1));
    }

    #[test]
    fn opposite_pairs_add_one_step_on_their_own_axis() {
        // Top + bottom: one height step for the pair, one width step each.
        let (w, h) = room_size("s", "room_2", &[Edge::Top, Edge::Bottom]);
        assert!(in_steps(w - BASE_WIDTH, 2));
        assert!(in_steps(h - BASE_HEIGHT, 1));

        // Left + right: one width step for the pair, one height step each.
        let (w, h) = room_size("s", "room_2", &[Edge::Left, Edge::Right]);
        assert!(in_steps(w - BASE_WIDTH, 1));
        assert!(in_steps(h - BASE_HEIGHT, 2));
    }

    #[test]
    fn sizing_is_seeded_per_room() {
        let edges = [Edge::Left, Edge::Right, Edge::Top];
        assert_eq!(room_size("s", "room_3", &edges), room_size("s", "room_3", &edges));
        let sizes: Vec<_> = (1..=8)
            .map(|i| room_size("s", &format!("room_{i}"), &edges))
            .collect();
        assert!(sizes.iter().any(|s| *s != sizes[0]));
    }
}
