//! Abstract room graph synthesis.
//!
//! A graph is grown in four deterministic stages from a single RNG stream:
//! a linear critical path, branches hung off its back 70%, a handful of loop
//! edges, and finally gates with their items. A bounded repair loop then
//! strips gates until the goal is reachable or the budget is spent.

use mw_core::{
    Connection, GateKind, GateRequirement, GatingMode, GraphMeta, RoomNode, SeededRng, WorldGraph,
};

use crate::config::GraphOptions;
use crate::solver::solve_progression;

/// Gates the repair loop may strip before giving up.
pub const MAX_REPAIR_ATTEMPTS: u32 = 5;

fn room_id(index: usize) -> String {
    format!("room_{}", index + 1)
}

/// Generate a graph, using keys for every gate in `mixed` mode.
pub fn generate_world_graph(options: &GraphOptions) -> WorldGraph {
    generate_world_graph_with(options, |_| GateKind::Key)
}

/// Generate a graph, asking `pick_kind` for the gate kind of each gated edge
/// when the gating mode is `mixed`. The picker is ignored in other modes.
pub fn generate_world_graph_with<F>(options: &GraphOptions, mut pick_kind: F) -> WorldGraph
where
    F: FnMut(&Connection) -> GateKind,
{
    let opts = options.clamped();
    let mut rng = SeededRng::new(&opts.seed);

    let path_len = critical_path_len(opts.room_count);
    let mut nodes: Vec<RoomNode> = (0..path_len)
        .map(|i| RoomNode::new(room_id(i), i as u32))
        .collect();
    let mut edges: Vec<Connection> = (1..path_len)
        .map(|i| Connection::new(room_id(i - 1), room_id(i)))
        .collect();

    grow_branches(&mut nodes, &mut edges, &opts, &mut rng);
    add_loops(&nodes, &mut edges, opts.loops_ratio, &mut rng);

    let start = room_id(0);
    let goal = room_id(path_len - 1);
    place_gates(&mut nodes, &mut edges, &start, &opts, &mut rng, &mut pick_kind);

    let mut graph = WorldGraph {
        nodes,
        edges,
        start,
        goal,
        seed: opts.seed.clone(),
        solvable: false,
        meta: GraphMeta {
            room_count: opts.room_count,
            loops_ratio: opts.loops_ratio,
            branch_factor: opts.branch_factor,
            gating_mode: opts.gating.mode,
            gate_frequency: opts.gating.gate_frequency,
            repair_attempts: 0,
            gates_stripped: 0,
        },
    };
    repair(&mut graph, &mut rng);

    tracing::debug!(
        target: "mapweaver::gen",
        seed = %graph.seed,
        rooms = graph.nodes.len(),
        edges = graph.edges.len(),
        gates = graph.gate_count(),
        solvable = graph.solvable,
        "graph.generated"
    );
    graph
}

/// Length of the critical path for a room budget.
pub fn critical_path_len(room_count: usize) -> usize {
    (room_count / 2).max(3).min(room_count.max(1))
}

fn grow_branches(
    nodes: &mut Vec<RoomNode>,
    edges: &mut Vec<Connection>,
    opts: &GraphOptions,
    rng: &mut SeededRng,
) {
    let batch = opts.branch_factor.max(1.0).round() as usize;
    while nodes.len() < opts.room_count {
        let len = nodes.len();
        let lo = (len as f64 * 0.3).floor() as usize;
        let attach = lo + rng.below(len - lo);
        let parent_id = nodes[attach].id.clone();
        let child_depth = nodes[attach].depth + 1;

        let count = batch.min(opts.room_count - len);
        for _ in 0..count {
            let id = room_id(nodes.len());
            edges.push(Connection::new(parent_id.clone(), id.clone()));
            nodes.push(RoomNode::new(id, child_depth));
        }
    }
}

fn add_loops(nodes: &[RoomNode], edges: &mut Vec<Connection>, ratio: f64, rng: &mut SeededRng) {
    let n = nodes.len();
    let mut candidates: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 2..n).map(move |j| (i, j)))
        .collect();
    rng.shuffle(&mut candidates);

    let count = (candidates.len() as f64 * ratio * 0.05).floor() as usize;
    for &(i, j) in candidates.iter().take(count) {
        let (a, b) = (&nodes[i].id, &nodes[j].id);
        let exists = edges
            .iter()
            .any(|e| (e.from == *a && e.to == *b) || (e.from == *b && e.to == *a));
        if !exists {
            edges.push(Connection::new(a.clone(), b.clone()));
        }
    }
}

fn place_gates<F>(
    nodes: &mut [RoomNode],
    edges: &mut [Connection],
    start: &str,
    opts: &GraphOptions,
    rng: &mut SeededRng,
    pick_kind: &mut F,
) where
    F: FnMut(&Connection) -> GateKind,
{
    let mut eligible: Vec<usize> = edges
        .iter()
        .enumerate()
        .filter(|(_, e)| e.from != start)
        .map(|(i, _)| i)
        .collect();
    rng.shuffle(&mut eligible);

    let count = (eligible.len() as f64 * opts.gating.gate_frequency).floor() as usize;
    for (n, &edge_index) in eligible.iter().take(count).enumerate() {
        let kind = match opts.gating.mode {
            GatingMode::Keys => GateKind::Key,
            GatingMode::Abilities => GateKind::Ability,
            GatingMode::Mixed => pick_kind(&edges[edge_index]),
        };
        let gate = GateRequirement::new(kind, format!("{kind}_{}", n + 1));
        let token = gate.token();

        let from_depth = nodes
            .iter()
            .find(|node| node.id == edges[edge_index].from)
            .map_or(0, |node| node.depth);
        let target = edges[edge_index].to.clone();
        let qualifying: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.depth <= from_depth && node.id != target)
            .map(|(i, _)| i)
            .collect();
        let holder = rng
            .choice(&qualifying)
            .copied()
            .or_else(|| nodes.iter().position(|node| node.id == start));
        if let Some(holder) = holder {
            nodes[holder].items.push(token);
        }
        edges[edge_index].gate = Some(gate);
    }
}

/// Strip randomly chosen gates until the goal is reachable, at most
/// [`MAX_REPAIR_ATTEMPTS`] times, and record the verdict in
/// `graph.solvable` and the repair counters in `graph.meta`.
pub fn repair(graph: &mut WorldGraph, rng: &mut SeededRng) {
    let mut progression = solve_progression(graph);
    let mut attempts = 0;
    while !progression.goal_reachable && attempts < MAX_REPAIR_ATTEMPTS {
        attempts += 1;
        let gated: Vec<usize> = graph
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.gate.is_some())
            .map(|(i, _)| i)
            .collect();
        let Some(&victim) = rng.choice(&gated) else {
            break;
        };
        let stripped = graph.edges[victim].gate.take();
        graph.meta.gates_stripped += 1;
        tracing::debug!(
            target: "mapweaver::gen",
            attempt = attempts,
            from = %graph.edges[victim].from,
            to = %graph.edges[victim].to,
            gate = ?stripped.map(|g| g.token()),
            "graph.repair.strip_gate"
        );
        progression = solve_progression(graph);
    }

    graph.meta.repair_attempts = attempts;
    graph.solvable = progression.goal_reachable;
    if !graph.solvable {
        tracing::warn!(
            target: "mapweaver::gen",
            seed = %graph.seed,
            attempts,
            "graph.repair.exhausted: goal unreachable"
        );
    }
}
