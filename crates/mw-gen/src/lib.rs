//! Room graph generation for Mapweaver.
//!
//! The pipeline is three pure functions: [`generate_world_graph`] builds an
//! abstract room/gate graph and repairs it until the goal is reachable (or the
//! repair budget runs out), [`solve_progression`] decides reachability under
//! gating, and [`convert_to_world_data`] turns the graph into sized rooms with
//! exits and grid positions. Tile filling lives in `mw-tiles`.

/// Option structs for generation and conversion.
pub mod config;
/// Graph to world document conversion.
pub mod convert;
/// Abstract graph synthesis with gating and repair.
pub mod generator;
/// Fixpoint reachability under gated connections.
pub mod solver;

/// Re-exports of the option types.
pub use config::{ConvertOptions, GatingOptions, GraphOptions};
/// Re-export of the converter entry point.
pub use convert::convert_to_world_data;
/// Re-exports of the generator entry points.
pub use generator::{generate_world_graph, generate_world_graph_with};
/// Re-exports of the solver types.
pub use solver::{Progression, ProgressionState, solve_progression};
