//! CLI frontend for the Mapweaver world generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mw",
    about = "Mapweaver: seeded Metroidvania world generation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log generation steps to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a room graph and convert it into a world document
    Generate(commands::generate::GenerateArgs),

    /// Check whether a graph's goal is reachable
    Solve {
        /// Graph JSON file
        graph: PathBuf,
    },

    /// Fill room tiles in a world document
    Fill {
        /// World JSON file
        world: PathBuf,

        /// Only fill this room
        #[arg(short, long)]
        room: Option<String>,

        /// Fill algorithm: cave, outside, corridor
        #[arg(short, long, default_value = "cave")]
        algorithm: String,

        /// Regeneration counter
        #[arg(long, default_value = "0")]
        regen: u32,

        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the render-time room layout
    Layout {
        /// World JSON file
        world: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render a room's tiles as ASCII
    Show {
        /// World JSON file
        world: PathBuf,

        /// Room id
        #[arg(short, long)]
        room: String,
    },

    /// Validate a world document
    Check {
        /// World JSON file
        world: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(&args),
        Commands::Solve { graph } => commands::solve::run(&graph),
        Commands::Fill {
            world,
            room,
            algorithm,
            regen,
            output,
        } => commands::fill::run(&world, room.as_deref(), &algorithm, regen, output.as_deref()),
        Commands::Layout { world, json } => commands::layout::run(&world, json),
        Commands::Show { world, room } => commands::show::run(&world, &room),
        Commands::Check { world } => commands::check::run(&world),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
