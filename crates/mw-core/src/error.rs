use crate::world::Edge;

/// Alias for `Result<T, MwError>`.
pub type MwResult<T> = Result<T, MwError>;

/// Errors that can occur when loading, validating, or querying documents.
///
/// Generation itself never fails; these cover the boundaries where callers
/// hand us data we did not produce.
#[derive(Debug, thiserror::Error)]
pub enum MwError {
    /// A document could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested room id does not exist in the world.
    #[error("room not found: \"{0}\"")]
    RoomNotFound(String),

    /// The world's starting map is not one of its rooms.
    #[error("starting map \"{0}\" is not a room of this world")]
    MissingStartingMap(String),

    /// An exit points at a room that does not exist.
    #[error("exit \"{exit}\" in room \"{room}\" targets unknown room \"{target}\"")]
    DanglingExit {
        /// The room owning the exit.
        room: String,
        /// The exit id.
        exit: String,
        /// The missing target room id.
        target: String,
    },

    /// A room's tile grid does not match its pixel size.
    #[error("room \"{room}\" has a {actual_w}x{actual_h} tile grid, expected {expected_w}x{expected_h}")]
    TileDimensions {
        /// The offending room.
        room: String,
        /// Expected grid width in tiles.
        expected_w: usize,
        /// Expected grid height in tiles.
        expected_h: usize,
        /// Actual grid width in tiles.
        actual_w: usize,
        /// Actual grid height in tiles.
        actual_h: usize,
    },

    /// An exit's tile range falls outside its edge.
    #[error("exit \"{exit}\" in room \"{room}\" has tile range {start}..={end} outside the {edge} edge ({len} tiles)")]
    ExitRange {
        /// The room owning the exit.
        room: String,
        /// The exit id.
        exit: String,
        /// The edge the exit sits on.
        edge: Edge,
        /// First tile index.
        start: usize,
        /// Last tile index.
        end: usize,
        /// Number of tiles along that edge.
        len: usize,
    },

    /// A fill algorithm name was not recognized.
    #[error("unknown fill algorithm: \"{0}\" (expected cave, outside, or corridor)")]
    UnknownAlgorithm(String),

    /// A gating mode name was not recognized.
    #[error("unknown gating mode: \"{0}\" (expected keys, abilities, or mixed)")]
    UnknownGatingMode(String),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
