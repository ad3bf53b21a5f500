pub mod check;
pub mod fill;
pub mod generate;
pub mod layout;
pub mod show;
pub mod solve;

use std::path::Path;

use mw_core::{WorldData, WorldGraph};

/// Read and parse a world document.
fn load_world(path: &Path) -> Result<WorldData, String> {
    let json = read(path)?;
    WorldData::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// Read and parse a room graph.
fn load_graph(path: &Path) -> Result<WorldGraph, String> {
    let json = read(path)?;
    WorldGraph::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

fn read(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Write `content` to `path`, or to stdout when no path is given.
fn write_out(path: Option<&Path>, content: &str) -> Result<(), String> {
    match path {
        Some(path) => std::fs::write(path, content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

/// Look up a room, suggesting the closest id when it is missing.
fn find_room<'a>(world: &'a WorldData, id: &str) -> Result<&'a mw_core::WorldMapData, String> {
    world.room(id).map_err(|e| match suggest(id, world.room_ids()) {
        Some(close) => format!("{e}. Did you mean \"{close}\"?"),
        None => e.to_string(),
    })
}

/// The candidate closest to `input`, if any is close enough.
fn suggest<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .map(|c| (strsim::normalized_levenshtein(input, c), c))
        .filter(|(score, _)| *score >= 0.6)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c)
}
