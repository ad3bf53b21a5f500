use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use mw_layout::calculate_layout;

pub fn run(path: &Path, json: bool) -> Result<(), String> {
    let world = super::load_world(path)?;
    let layout = calculate_layout(&world);

    if json {
        let out = serde_json::to_string_pretty(&layout)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Room", "X", "Y", "W", "H"]);
    for (id, pos) in &layout.positions {
        let (w, h) = layout
            .sizes
            .get(id)
            .map_or(("—".to_string(), "—".to_string()), |s| {
                (s.w.to_string(), s.h.to_string())
            });
        table.add_row(vec![id.clone(), pos.x.to_string(), pos.y.to_string(), w, h]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} rooms in a {}x{} grid",
        layout.positions.len(),
        layout.total_width,
        layout.total_height
    );
    Ok(())
}
