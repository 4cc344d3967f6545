//! Room model, floor polygon, spatial queries and wall volumes.

pub mod model;
pub mod polygon;
pub mod space;
pub mod viewer;
pub mod walls;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::math::Vector3;

pub use model::{CardinalLabel, Corner, Obstacle, RoomGeometry, Wall, DEFAULT_ROOM_HEIGHT};
pub use polygon::FloorPolygon;
pub use space::{Bounds, RoomSpace};
pub use viewer::ViewerClamp;
pub use walls::{build_wall_slabs, WallSlab};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Typed access to the vertical extent of a room.
pub trait RoomDimensions {
    /// Floor-to-ceiling height in meters.
    fn room_height_meters(&self) -> f64;
    /// Elevation of the floor plane.
    fn floor_elevation(&self) -> f64;
}

/// Settings applied when turning a [`RoomGeometry`] into a [`Room`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub floor_elevation: f64,
    pub wall_thickness: f64,
    /// Height used when the geometry carries a non-positive one.
    pub default_height: f64,
    /// Canonical facing direction for items placed in the room.
    pub forward: Vector3,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            floor_elevation: 0.05,
            wall_thickness: 0.1,
            default_height: DEFAULT_ROOM_HEIGHT,
            forward: Vector3::z(),
        }
    }
}

/// A fully built room: the measured description, its floor query structure
/// and its wall volumes.
///
/// Every build gets a process-unique generation stamp. Anything that caches
/// room-derived state records the stamp and compares it before acting.
#[derive(Debug, Clone)]
pub struct Room {
    geometry: RoomGeometry,
    space: RoomSpace,
    slabs: Vec<WallSlab>,
    config: RoomConfig,
    height: f64,
    generation: u64,
}

impl Room {
    /// Builds the floor polygon, room space and wall slabs for `geometry`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IncompleteGeometry` when the wall graph does
    /// not close into a single loop of at least 3 corners.
    pub fn build(geometry: RoomGeometry, config: RoomConfig) -> Result<Self> {
        let polygon = FloorPolygon::from_geometry(&geometry)?;
        let height = if geometry.height_meters > 0.0 {
            geometry.height_meters
        } else {
            config.default_height
        };
        let space = RoomSpace::new(polygon, config.floor_elevation).with_forward(config.forward);
        let slabs = build_wall_slabs(
            &geometry,
            config.floor_elevation,
            height,
            config.wall_thickness,
        );
        let generation = next_generation();
        debug!(
            generation,
            corners = geometry.corners.len(),
            slabs = slabs.len(),
            height,
            "built room"
        );
        Ok(Self {
            geometry,
            space,
            slabs,
            config,
            height,
            generation,
        })
    }

    /// Replaces this room with one built from `geometry`.
    ///
    /// The new state is built completely before it is swapped in, so on
    /// error `self` is left as it was.
    ///
    /// # Errors
    ///
    /// Same as [`Room::build`].
    pub fn rebuild(&mut self, geometry: RoomGeometry) -> Result<()> {
        *self = Self::build(geometry, self.config)?;
        Ok(())
    }

    #[must_use]
    pub fn geometry(&self) -> &RoomGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn space(&self) -> &RoomSpace {
        &self.space
    }

    #[must_use]
    pub fn slabs(&self) -> &[WallSlab] {
        &self.slabs
    }

    #[must_use]
    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Stamp identifying this build of the room.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RoomDimensions for Room {
    fn room_height_meters(&self) -> f64 {
        self.height
    }

    fn floor_elevation(&self) -> f64 {
        self.space.floor_elevation()
    }
}
