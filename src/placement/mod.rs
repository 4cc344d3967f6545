//! Dropping assets into a room: targeting, orientation, scaling, floor
//! alignment and wall push-out.

pub mod asset;
pub mod category;
pub mod config;
pub mod item;
pub mod penetration;
pub mod scale;
pub mod solver;

pub use asset::{AssetCatalog, AssetDescriptor, AssetShape};
pub use category::{target_height, Category};
pub use config::{PlacementConfig, YawPolicy, DEFAULT_GRID_SNAP};
pub use item::PlacedItem;
pub use penetration::{overlapping_walls, resolve_wall_penetration, PenetrationReport};
pub use solver::{
    align_to_floor, snap_xz, GesturePhase, PlacementGesture, PlacementOutcome, PlacementSolver,
    PlacementWarning,
};
