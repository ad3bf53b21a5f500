use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path, id: &str) -> Result<(), String> {
    let world = super::load_world(path)?;
    let room = super::find_room(&world, id)?;
    let (w, h) = room.world.tile_dims();

    let start = if room.id == world.starting_map {
        " start".green().to_string()
    } else {
        String::new()
    };
    println!("  {} [{w}x{h} tiles{start}]", room.id.bold());
    println!();
    for line in room.tiles.to_string().lines() {
        println!("  {line}");
    }
    println!();

    if room.exits.is_empty() {
        println!("  {} (none)", "Exits:".dimmed());
    } else {
        println!("  {}", "Exits:".dimmed());
        for exit in &room.exits {
            println!(
                "    {} {} tiles {}..={} to {}",
                exit.id,
                exit.edge,
                exit.tile_start,
                exit.tile_end,
                exit.target_map_id
            );
        }
    }
    Ok(())
}
