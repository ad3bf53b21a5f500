use std::path::Path;

use mw_tiles::{Algorithm, FillOptions, fill_room, fill_world};

pub fn run(
    path: &Path,
    room: Option<&str>,
    algorithm: &str,
    regen: u32,
    output: Option<&Path>,
) -> Result<(), String> {
    let algorithm: Algorithm = algorithm.parse().map_err(|e: mw_core::MwError| e.to_string())?;
    let mut world = super::load_world(path)?;

    let filled = match room {
        Some(id) => {
            let tiles = {
                let target = super::find_room(&world, id)?;
                let options = FillOptions::new(world.seed.clone())
                    .with_algorithm(algorithm)
                    .with_regeneration(regen);
                fill_room(target, &options)
            };
            world.room_mut(id).map_err(|e| e.to_string())?.tiles = tiles;
            1
        }
        None => {
            world = fill_world(&world, algorithm, regen);
            world.maps.len()
        }
    };

    let json = world.to_json().map_err(|e| e.to_string())?;
    let target = output.unwrap_or(path);
    super::write_out(Some(target), &json)?;
    eprintln!(
        "  Filled {filled} room(s) with {algorithm} into {}",
        target.display()
    );
    Ok(())
}
