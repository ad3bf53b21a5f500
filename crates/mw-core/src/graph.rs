use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MwError, MwResult};

/// What kind of progression item opens a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// A consumable key.
    Key,
    /// A movement ability (double jump, dash, ...).
    Ability,
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::Ability => write!(f, "ability"),
        }
    }
}

/// How the generator chooses gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatingMode {
    /// Every gate needs a key.
    #[default]
    Keys,
    /// Every gate needs an ability.
    Abilities,
    /// The caller picks per edge; keys when no picker is given.
    Mixed,
}

impl fmt::Display for GatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keys => write!(f, "keys"),
            Self::Abilities => write!(f, "abilities"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for GatingMode {
    type Err = MwError;

    fn from_str(s: &str) -> MwResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "keys" | "key" => Ok(Self::Keys),
            "abilities" | "ability" => Ok(Self::Abilities),
            "mixed" => Ok(Self::Mixed),
            other => Err(MwError::UnknownGatingMode(other.to_string())),
        }
    }
}

/// A parsed `"<kind>:<id>"` item token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemToken {
    /// The item's kind.
    pub kind: GateKind,
    /// The item's id, e.g. `key_3`.
    pub id: String,
}

impl ItemToken {
    /// Parse a token like `"key:key_1"`. Returns `None` for anything else.
    pub fn parse(token: &str) -> Option<Self> {
        let (kind, id) = token.split_once(':')?;
        let kind = match kind {
            "key" => GateKind::Key,
            "ability" => GateKind::Ability,
            _ => return None,
        };
        if id.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            id: id.to_string(),
        })
    }
}

impl fmt::Display for ItemToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// The item a player must hold to cross a gated connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateRequirement {
    /// Kind of the required item.
    pub kind: GateKind,
    /// Id of the required item.
    pub id: String,
}

impl GateRequirement {
    /// Creates a requirement for the given kind and id.
    pub fn new(kind: GateKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// The item token that satisfies this gate.
    pub fn token(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }
}

/// A room in the abstract graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomNode {
    /// Unique room id, `room_<n>`.
    pub id: String,
    /// Distance from the start along the path that created this room.
    pub depth: u32,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Item tokens that can be picked up in this room.
    #[serde(default)]
    pub items: Vec<String>,
}

impl RoomNode {
    /// Creates an empty room at the given depth.
    pub fn new(id: impl Into<String>, depth: u32) -> Self {
        Self {
            id: id.into(),
            depth,
            label: None,
            items: Vec::new(),
        }
    }

    /// Attaches a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds an item token.
    pub fn with_item(mut self, token: impl Into<String>) -> Self {
        self.items.push(token.into());
        self
    }
}

/// A directed edge between two rooms.
///
/// The gate, when present, guards the `from -> to` direction only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Source room id.
    pub from: String,
    /// Target room id.
    pub to: String,
    /// Optional gate on the forward direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateRequirement>,
}

impl Connection {
    /// Creates an ungated connection.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            gate: None,
        }
    }

    /// Adds a gate to this connection.
    pub fn gated(mut self, gate: GateRequirement) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Whether this connection touches `room` at either end.
    pub fn touches(&self, room: &str) -> bool {
        self.from == room || self.to == room
    }

    /// The endpoint opposite `room`, if `room` is an endpoint.
    pub fn other_end(&self, room: &str) -> Option<&str> {
        if self.from == room {
            Some(&self.to)
        } else if self.to == room {
            Some(&self.from)
        } else {
            None
        }
    }
}

/// The options a graph was generated with, after clamping, plus repair stats.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMeta {
    /// Target room count.
    pub room_count: usize,
    /// Fraction of loop candidates considered.
    pub loops_ratio: f64,
    /// Children per branch attachment.
    pub branch_factor: f64,
    /// Gate kind selection.
    pub gating_mode: GatingMode,
    /// Fraction of eligible edges gated.
    pub gate_frequency: f64,
    /// Solver runs performed by the repair loop.
    pub repair_attempts: u32,
    /// Gates removed by the repair loop.
    pub gates_stripped: u32,
}

/// The abstract room graph produced by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldGraph {
    /// Rooms in creation order.
    pub nodes: Vec<RoomNode>,
    /// Connections in creation order.
    pub edges: Vec<Connection>,
    /// Starting room id.
    pub start: String,
    /// Goal room id.
    pub goal: String,
    /// Normalized seed string.
    pub seed: String,
    /// Whether the goal was reachable when generation finished.
    pub solvable: bool,
    /// Generation parameters and repair statistics.
    #[serde(default)]
    pub meta: GraphMeta,
}

impl WorldGraph {
    /// Look up a room by id.
    pub fn node(&self, id: &str) -> Option<&RoomNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of rooms sharing a connection with `id`, in edge order, without duplicates.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for edge in &self.edges {
            if let Some(other) = edge.other_end(id) {
                if other != id && !out.contains(&other) {
                    out.push(other);
                }
            }
        }
        out
    }

    /// Whether any connection joins `a` and `b` in either direction.
    pub fn adjacent(&self, a: &str, b: &str) -> bool {
        self.edges
            .iter()
            .any(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
    }

    /// Number of gated connections.
    pub fn gate_count(&self) -> usize {
        self.edges.iter().filter(|e| e.gate.is_some()).count()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> MwResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> MwResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
