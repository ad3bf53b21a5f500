//! Progression solving: which rooms and items a player can reach.
//!
//! The solver runs breadth-first passes from the start room. Items are
//! collected the moment a room is visited, so a key found early in a pass can
//! open a gate examined later in the same pass. Passes repeat until one adds no
//! new item; since the item set only grows, that takes at most `items + 1`
//! passes.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use mw_core::WorldGraph;

/// The outcome of solving a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    /// Rooms the player can enter.
    pub reachable_rooms: BTreeSet<String>,
    /// Item tokens the player can collect.
    pub obtained_items: BTreeSet<String>,
    /// Whether the goal room is reachable.
    pub goal_reachable: bool,
    /// Number of passes run, including the final unproductive one.
    pub passes: usize,
}

/// Neighbors of every room, with the item token required to move there.
/// A gate only guards its forward direction, so reverse steps carry `None`.
fn adjacency(graph: &WorldGraph) -> HashMap<&str, Vec<(&str, Option<String>)>> {
    let mut adj: HashMap<&str, Vec<(&str, Option<String>)>> = HashMap::new();
    for edge in &graph.edges {
        let token = edge.gate.as_ref().map(|g| g.token());
        adj.entry(edge.from.as_str())
            .or_default()
            .push((edge.to.as_str(), token));
        adj.entry(edge.to.as_str())
            .or_default()
            .push((edge.from.as_str(), None));
    }
    adj
}

/// Intermediate solver state, exposed so callers can step pass by pass.
#[derive(Debug, Clone, Default)]
pub struct ProgressionState {
    reachable: BTreeSet<String>,
    obtained: BTreeSet<String>,
    passes: usize,
}

impl ProgressionState {
    /// Fresh state holding only the start room's own items.
    pub fn new(graph: &WorldGraph) -> Self {
        let obtained = graph
            .node(&graph.start)
            .map(|n| n.items.iter().cloned().collect())
            .unwrap_or_default();
        Self {
            reachable: BTreeSet::new(),
            obtained,
            passes: 0,
        }
    }

    /// Rooms reached so far.
    pub fn reachable_rooms(&self) -> &BTreeSet<String> {
        &self.reachable
    }

    /// Items collected so far.
    pub fn obtained_items(&self) -> &BTreeSet<String> {
        &self.obtained
    }

    /// Run one breadth-first pass. Returns `true` if it collected a new item.
    pub fn run_pass(&mut self, graph: &WorldGraph) -> bool {
        self.passes += 1;
        let adj = adjacency(graph);
        let mut productive = false;
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();

        let mut seeds: Vec<String> = vec![graph.start.clone()];
        seeds.extend(self.reachable.iter().cloned());
        for seed in seeds {
            if graph.node(&seed).is_some() && visited.insert(seed.clone()) {
                productive |= self.visit(graph, &seed);
                queue.push_back(seed);
            }
        }

        while let Some(room) = queue.pop_front() {
            let Some(neighbors) = adj.get(room.as_str()) else {
                continue;
            };
            for (next, token) in neighbors {
                if visited.contains(*next) {
                    continue;
                }
                let open = token.as_ref().is_none_or(|t| self.obtained.contains(t));
                if open && graph.node(next).is_some() {
                    visited.insert((*next).to_string());
                    productive |= self.visit(graph, next);
                    queue.push_back((*next).to_string());
                }
            }
        }
        productive
    }

    /// Mark a room reached and merge its items. Returns `true` on a new item.
    fn visit(&mut self, graph: &WorldGraph, room: &str) -> bool {
        self.reachable.insert(room.to_string());
        let mut new_item = false;
        if let Some(node) = graph.node(room) {
            for item in &node.items {
                new_item |= self.obtained.insert(item.clone());
            }
        }
        new_item
    }

    /// Freeze the state into a result.
    pub fn finish(self, graph: &WorldGraph) -> Progression {
        let goal_reachable = self.reachable.contains(&graph.goal);
        Progression {
            reachable_rooms: self.reachable,
            obtained_items: self.obtained,
            goal_reachable,
            passes: self.passes,
        }
    }
}

/// Solve a graph to its fixpoint.
pub fn solve_progression(graph: &WorldGraph) -> Progression {
    let mut state = ProgressionState::new(graph);
    while state.run_pass(graph) {}
    state.finish(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mw_core::{Connection, GateKind, GateRequirement, GraphMeta, RoomNode};

    fn graph(nodes: Vec<RoomNode>, edges: Vec<Connection>, goal: &str) -> WorldGraph {
        WorldGraph {
            nodes,
            edges,
            start: "A".into(),
            goal: goal.into(),
            seed: "solver".into(),
            solvable: true,
            meta: GraphMeta::default(),
        }
    }

    fn key(id: &str) -> GateRequirement {
        GateRequirement::new(GateKind::Key, id)
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn item_found_mid_pass_unlocks_later_edge() {
        let g = graph(
            vec![
                RoomNode::new("A", 0),
                RoomNode::new("B", 1).with_item("key:k1"),
                RoomNode::new("C", 2),
            ],
            vec![
                Connection::new("A", "B"),
                Connection::new("B", "C").gated(key("k1")),
            ],
            "C",
        );

        let mut state = ProgressionState::new(&g);
        assert!(state.run_pass(&g));
        assert_eq!(state.reachable_rooms(), &set(&["A", "B", "C"]));

        let result = solve_progression(&g);
        assert!(result.goal_reachable);
        assert_eq!(result.reachable_rooms, set(&["A", "B", "C"]));
        assert_eq!(result.obtained_items, set(&["key:k1"]));
        // The second pass confirms nothing new.
        assert_eq!(result.passes, 2);
    }

    #[test]
    fn item_behind_its_own_gate_is_unreachable() {
        let g = graph(
            vec![
                RoomNode::new("A", 0),
                RoomNode::new("B", 1),
                RoomNode::new("C", 2).with_item("key:k1"),
            ],
            vec![
                Connection::new("A", "B"),
                Connection::new("B", "C").gated(key("k1")),
            ],
            "C",
        );
        let result = solve_progression(&g);
        assert!(!result.goal_reachable);
        assert_eq!(result.reachable_rooms, set(&["A", "B"]));
        assert!(result.obtained_items.is_empty());
    }

    #[test]
    fn start_room_items_count_from_the_beginning() {
        let g = graph(
            vec![
                RoomNode::new("A", 0).with_item("key:k1"),
                RoomNode::new("B", 1),
            ],
            vec![Connection::new("A", "B").gated(key("k1"))],
            "B",
        );
        assert!(solve_progression(&g).goal_reachable);
    }

    #[test]
    fn later_pass_uses_items_found_after_gate_was_examined() {
        // A -> G (gated k1), A -> D -> E; k1 lives in E. BFS examines A->G
        // before reaching E, so G needs a second pass.
        let g = graph(
            vec![
                RoomNode::new("A", 0),
                RoomNode::new("G", 1),
                RoomNode::new("D", 1),
                RoomNode::new("E", 2).with_item("key:k1"),
            ],
            vec![
                Connection::new("A", "G").gated(key("k1")),
                Connection::new("A", "D"),
                Connection::new("D", "E"),
            ],
            "G",
        );
        let mut state = ProgressionState::new(&g);
        assert!(state.run_pass(&g));
        assert!(!state.reachable_rooms().contains("G"));
        assert!(!state.run_pass(&g));
        assert!(state.reachable_rooms().contains("G"));

        let result = solve_progression(&g);
        assert!(result.goal_reachable);
        assert_eq!(result.passes, 2);
    }

    #[test]
    fn gates_only_guard_the_forward_direction() {
        // B is reachable through C's back door even though A->B is gated.
        let g = graph(
            vec![RoomNode::new("A", 0), RoomNode::new("B", 1), RoomNode::new("C", 1)],
            vec![
                Connection::new("A", "B").gated(key("never")),
                Connection::new("A", "C"),
                Connection::new("B", "C"),
            ],
            "B",
        );
        assert!(solve_progression(&g).goal_reachable);
    }

    #[test]
    fn missing_start_reaches_nothing() {
        let mut g = graph(vec![RoomNode::new("B", 0)], vec![], "B");
        g.start = "ghost".into();
        let result = solve_progression(&g);
        assert!(result.reachable_rooms.is_empty());
        assert!(!result.goal_reachable);
    }

    #[test]
    fn solving_is_deterministic() {
        let g = graph(
            vec![
                RoomNode::new("A", 0),
                RoomNode::new("B", 1).with_item("ability:dash"),
                RoomNode::new("C", 2),
            ],
            vec![
                Connection::new("A", "B"),
                Connection::new("B", "C").gated(GateRequirement::new(GateKind::Ability, "dash")),
            ],
            "C",
        );
        assert_eq!(solve_progression(&g), solve_progression(&g));
    }
}
