use std::path::Path;

pub fn run(path: &Path) -> Result<(), String> {
    let world = super::load_world(path)?;
    world.validate().map_err(|e| e.to_string())?;

    println!("  All checks passed for seed '{}'.", world.seed);
    println!("  {} rooms, {} exits", world.maps.len(), world.exit_count());

    Ok(())
}
