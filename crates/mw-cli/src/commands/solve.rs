use std::path::Path;

use colored::Colorize;
use mw_gen::solve_progression;

pub fn run(path: &Path) -> Result<(), String> {
    let graph = super::load_graph(path)?;
    let progression = solve_progression(&graph);

    println!(
        "  {} of {} rooms reachable after {} pass(es)",
        progression.reachable_rooms.len(),
        graph.nodes.len(),
        progression.passes,
    );
    let rooms: Vec<&str> = progression.reachable_rooms.iter().map(String::as_str).collect();
    println!("  rooms: {}", rooms.join(", "));
    if progression.obtained_items.is_empty() {
        println!("  items: {}", "(none)".dimmed());
    } else {
        let items: Vec<&str> = progression.obtained_items.iter().map(String::as_str).collect();
        println!("  items: {}", items.join(", "));
    }
    println!();

    if progression.goal_reachable {
        println!("  {} goal \"{}\" is reachable", "OK".green().bold(), graph.goal);
        Ok(())
    } else {
        Err(format!("goal \"{}\" is unreachable", graph.goal))
    }
}
