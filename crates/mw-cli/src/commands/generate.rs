use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use mw_core::{GateKind, GatingMode, SeededRng, WorldGraph};
use mw_gen::{ConvertOptions, GraphOptions, convert_to_world_data, generate_world_graph_with};
use mw_tiles::{Algorithm, fill_world};

#[derive(Args)]
pub struct GenerateArgs {
    /// Seed string (default: a random one)
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Number of rooms
    #[arg(short, long)]
    pub rooms: Option<usize>,

    /// Share of loop candidates to connect, 0..1
    #[arg(long)]
    pub loops: Option<f64>,

    /// Children per branch attachment
    #[arg(long)]
    pub branch: Option<f64>,

    /// Gating mode: keys, abilities, mixed
    #[arg(long)]
    pub gating: Option<String>,

    /// Fraction of eligible edges to gate, 0..0.9
    #[arg(long)]
    pub gate_frequency: Option<f64>,

    /// JSON file with graph options; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write the room graph to this file
    #[arg(long)]
    pub graph_out: Option<PathBuf>,

    /// Tile edge length in pixels
    #[arg(long, default_value = "16")]
    pub tile_size: u32,

    /// Author recorded in the document
    #[arg(long)]
    pub author: Option<String>,

    /// Fill every room with this algorithm: cave, outside, corridor
    #[arg(long)]
    pub fill: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> Result<(), String> {
    let options = graph_options(args)?;
    let fill = args
        .fill
        .as_deref()
        .map(str::parse::<Algorithm>)
        .transpose()
        .map_err(|e| e.to_string())?;

    tracing::debug!(
        target: "mapweaver::cli",
        seed = %options.seed,
        rooms = options.room_count,
        gating = %options.gating.mode,
        "options.resolved"
    );
    let graph = generate(&options);
    if let Some(path) = &args.graph_out {
        let json = graph.to_json().map_err(|e| e.to_string())?;
        super::write_out(Some(path), &json)?;
    }

    let mut convert = ConvertOptions::default().with_tile_size(args.tile_size);
    if let Some(author) = &args.author {
        convert = convert.with_author(author.clone());
    }
    let mut world = convert_to_world_data(&graph, &convert);
    if let Some(algorithm) = fill {
        world = fill_world(&world, algorithm, 0);
    }

    let json = world.to_json().map_err(|e| e.to_string())?;
    super::write_out(args.output.as_deref(), &json)?;
    print_summary(&graph, args.output.as_deref());
    Ok(())
}

fn graph_options(args: &GenerateArgs) -> Result<GraphOptions, String> {
    let mut options = match &args.config {
        Some(path) => {
            let json = super::read(path)?;
            serde_json::from_str::<GraphOptions>(&json)
                .map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => GraphOptions::default().with_seed(random_seed()),
    };

    if let Some(seed) = &args.seed {
        options = options.with_seed(seed.clone());
    }
    if let Some(rooms) = args.rooms {
        options = options.with_room_count(rooms);
    }
    if let Some(loops) = args.loops {
        options = options.with_loops_ratio(loops);
    }
    if let Some(branch) = args.branch {
        options = options.with_branch_factor(branch);
    }
    if let Some(gating) = &args.gating {
        let mode = gating.parse::<GatingMode>().map_err(|e| e.to_string())?;
        options = options.with_gating_mode(mode);
    }
    if let Some(frequency) = args.gate_frequency {
        options = options.with_gate_frequency(frequency);
    }
    Ok(options)
}

fn random_seed() -> String {
    format!("{:08x}", rand::random::<u32>())
}

/// Mixed mode flips a seeded coin per gate; the other modes ignore the picker.
fn generate(options: &GraphOptions) -> WorldGraph {
    let mut coin = SeededRng::new(&format!("{}-gatekind", options.clamped().seed));
    generate_world_graph_with(options, |_| {
        if coin.chance(0.5) {
            GateKind::Ability
        } else {
            GateKind::Key
        }
    })
}

fn print_summary(graph: &WorldGraph, output: Option<&Path>) {
    let verdict = if graph.solvable {
        "solvable".green().bold()
    } else {
        "unsolvable".red().bold()
    };
    eprintln!(
        "  {} seed {}: {} rooms, {} connections, {} gates ({verdict})",
        "Generated".bold(),
        graph.seed.cyan(),
        graph.nodes.len(),
        graph.edges.len(),
        graph.gate_count(),
    );
    if graph.meta.gates_stripped > 0 {
        eprintln!(
            "  {} stripped {} gate(s) in {} repair attempt(s)",
            "WARN".yellow().bold(),
            graph.meta.gates_stripped,
            graph.meta.repair_attempts,
        );
    }
    if let Some(path) = output {
        eprintln!("  Wrote {}", path.display());
    }
}
