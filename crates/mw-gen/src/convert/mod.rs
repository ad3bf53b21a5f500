//! Graph to world document conversion.
//!
//! Conversion places every room on a grid, picks the wall each connection
//! passes through, sizes rooms from their neighbor walls and spreads exits
//! along those walls. Tiles start empty; `mw-tiles` fills them.

/// Exit zone construction.
pub mod exits;
/// Generation-time grid placement.
pub mod placement;
/// Per-room tile dimensions.
pub mod sizing;

use std::collections::BTreeMap;

use mw_core::{Point, RoomBounds, WorldData, WorldGraph, WorldMapData};

use crate::config::ConvertOptions;
use exits::{Neighbor, build_exits};
use placement::{edge_between, place_rooms};
use sizing::room_size;

/// Rows of tiles per unit of `gridHeight`.
pub const GRID_HEIGHT_UNIT: u32 = 10;

/// Spawn offset from the start room's left and bottom walls, in tiles.
const SPAWN_INSET_TILES: u32 = 3;

/// Convert a generated graph into a world document with sized rooms, exits
/// and grid positions. Every room's tile grid is empty.
pub fn convert_to_world_data(graph: &WorldGraph, options: &ConvertOptions) -> WorldData {
    let tile_size = options.tile_size.max(1);
    let positions = place_rooms(graph);
    let mut maps = BTreeMap::new();

    for node in &graph.nodes {
        let Some(&pos) = positions.get(&node.id) else {
            continue;
        };
        let neighbors: Vec<Neighbor> = graph
            .neighbors(&node.id)
            .into_iter()
            .filter_map(|id| {
                positions.get(id).map(|&other| Neighbor {
                    edge: edge_between(pos, other),
                    pos: other,
                    id: id.to_string(),
                })
            })
            .collect();
        let walls: Vec<_> = neighbors.iter().map(|n| n.edge).collect();
        let (w_tiles, h_tiles) = room_size(&graph.seed, &node.id, &walls);

        let bounds = RoomBounds::from_tiles(w_tiles, h_tiles, tile_size);
        let mut room = WorldMapData::new(node.id.clone(), bounds);
        room.exits = build_exits(&bounds, &neighbors);
        room.grid_position = Some(pos);
        room.grid_height = Some(h_tiles.div_ceil(GRID_HEIGHT_UNIT));

        tracing::debug!(
            target: "mapweaver::convert",
            room = %node.id,
            x = pos.x,
            y = pos.y,
            w_tiles,
            h_tiles,
            exits = room.exits.len(),
            "room.placed"
        );
        maps.insert(node.id.clone(), room);
    }

    let starting_position = maps
        .get(&graph.start)
        .map(|room| {
            let inset = (SPAWN_INSET_TILES * tile_size) as i32;
            Point {
                x: inset,
                y: room.world.height as i32 - inset,
            }
        })
        .unwrap_or_default();

    WorldData {
        seed: graph.seed.clone(),
        author: options.author.clone(),
        starting_map: graph.start.clone(),
        starting_position,
        maps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphOptions;
    use crate::generator::generate_world_graph;
    use mw_core::{Connection, Edge, GraphMeta, RoomNode, Tile};
    use std::collections::HashSet;

    fn world(seed: &str, rooms: usize) -> (WorldGraph, WorldData) {
        let graph = generate_world_graph(
            &GraphOptions::default()
                .with_seed(seed)
                .with_room_count(rooms)
                .with_loops_ratio(0.6),
        );
        let world = convert_to_world_data(&graph, &ConvertOptions::default());
        (graph, world)
    }

    #[test]
    fn converted_worlds_validate() {
        for seed in ["alpha", "beta", "gamma", "delta"] {
            let (graph, world) = world(seed, 24);
            world.validate().unwrap();
            assert_eq!(world.maps.len(), graph.nodes.len());
            assert_eq!(world.starting_map, graph.start);
            assert_eq!(world.seed, graph.seed);
        }
    }

    #[test]
    fn every_room_gets_a_unique_cell() {
        let (_, world) = world("cells", 60);
        let cells: HashSet<_> = world.maps.values().filter_map(|m| m.grid_position).collect();
        assert_eq!(cells.len(), world.maps.len());
    }

    #[test]
    fn exits_are_reciprocal() {
        let (_, world) = world("mirror", 30);
        for room in world.maps.values() {
            for exit in &room.exits {
                let target = &world.maps[&exit.target_map_id];
                let back = target
                    .exits
                    .iter()
                    .find(|e| e.target_map_id == room.id)
                    .unwrap();
                assert_eq!(back.edge, exit.edge.opposite());
            }
        }
    }

    #[test]
    fn one_exit_per_graph_neighbor() {
        let (graph, world) = world("count", 30);
        for node in &graph.nodes {
            assert_eq!(world.maps[&node.id].exits.len(), graph.neighbors(&node.id).len());
        }
    }

    #[test]
    fn tiles_start_empty_and_match_bounds() {
        let (_, world) = world("tiles", 12);
        for room in world.maps.values() {
            let (w, h) = room.world.tile_dims();
            assert_eq!((room.tiles.width(), room.tiles.height()), (w, h));
            assert_eq!(room.tiles.count(Tile::Solid), 0);
            assert_eq!(room.grid_height, Some((h as u32).div_ceil(GRID_HEIGHT_UNIT)));
            assert!(w >= 25 && h >= 10);
        }
    }

    #[test]
    fn spawn_sits_inside_the_start_room() {
        let (_, world) = world("spawn", 8);
        let start = &world.maps[&world.starting_map];
        assert_eq!(world.starting_position.x, 48);
        assert_eq!(
            world.starting_position.y,
            start.world.height as i32 - 48
        );
    }

    #[test]
    fn hand_built_path_runs_left_to_right() {
        let graph = WorldGraph {
            nodes: vec![
                RoomNode::new("room_1", 0),
                RoomNode::new("room_2", 1),
                RoomNode::new("room_3", 2),
            ],
            edges: vec![
                Connection::new("room_1", "room_2"),
                Connection::new("room_2", "room_3"),
            ],
            start: "room_1".into(),
            goal: "room_3".into(),
            seed: "line".into(),
            solvable: true,
            meta: GraphMeta::default(),
        };
        let world = convert_to_world_data(&graph, &ConvertOptions::default().with_tile_size(8));
        let middle = &world.maps["room_2"];
        let walls: Vec<Edge> = middle.exits.iter().map(|e| e.edge).collect();
        assert_eq!(walls, vec![Edge::Left, Edge::Right]);
        assert_eq!(middle.world.tile_size, 8);
        // Left + right neighbors stretch the width once and the height twice.
        let (w, h) = middle.world.tile_dims();
        assert!((35..=50).contains(&w));
        assert!((30..=60).contains(&h));
        assert_eq!(world.maps["room_1"].exits[0].id, "exit_right_0");
    }

    #[test]
    fn conversion_is_deterministic() {
        let (_, a) = world("same", 20);
        let (_, b) = world("same", 20);
        assert_eq!(a, b);
    }

    #[test]
    fn author_and_zero_tile_size() {
        let (graph, _) = world("author", 6);
        let world = convert_to_world_data(
            &graph,
            &ConvertOptions::default().with_tile_size(0).with_author("ada"),
        );
        assert_eq!(world.author.as_deref(), Some("ada"));
        world.validate().unwrap();
        assert!(world.maps.values().all(|m| m.world.tile_size == 1));
    }
}
