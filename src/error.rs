use thiserror::Error;

/// Top-level error type for the room engine.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised while turning a wall graph into a usable room.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("incomplete geometry: {0}")]
    IncompleteGeometry(String),

    #[error("degenerate polygon: signed area {area} is numerically zero")]
    DegeneratePolygon { area: f64 },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Per-gesture placement failures. All are recoverable by retrying.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("pointer ray does not intersect the floor plane")]
    NoIntersection,

    #[error("room was rebuilt (gesture generation {gesture}, room generation {room})")]
    StaleRoom { gesture: u64, room: u64 },

    #[error("gesture is {found}, expected {expected}")]
    InvalidPhase {
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown asset: {0}")]
    UnknownAsset(String),
}

/// Errors related to committed furnishings.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("placed item not found")]
    ItemNotFound,
}

/// Errors related to loading external room descriptions.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed room description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown cardinal label: {0:?}")]
    UnknownCardinal(String),
}

/// Errors related to surface mesh generation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`RoomError`].
pub type Result<T> = std::result::Result<T, RoomError>;
