//! Render-time room layout for Mapweaver worlds.
//!
//! The generator's grid positions describe the abstract graph. This crate
//! instead lays out a finished [`WorldData`](mw_core::WorldData) from the
//! exits its rooms actually have, in 9×9-tile grid units, so a viewer can
//! draw boxes and connecting lines without overlaps.

/// Placed-rectangle bookkeeping for one layout run.
pub mod occupancy;
/// Breadth-first packing.
pub mod placement;
/// Required room footprints.
pub mod sizing;

/// Re-export the occupancy grid.
pub use occupancy::Occupancy;
/// Re-export the packing entry point and its result.
pub use placement::{WorldLayout, calculate_layout};
/// Re-export the sizing entry points.
pub use sizing::{GRID_UNIT, GridSize, SizingContext, compute_required_sizes};
