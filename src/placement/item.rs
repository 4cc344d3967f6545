use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Pose};
use crate::math::Point3;

use super::asset::AssetShape;

/// A committed piece of furniture: what it is, where it stands, and the
/// shape needed to keep it out of the walls when it is moved again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub asset_id: String,
    pub category: String,
    pub pose: Pose,
    pub shape: AssetShape,
}

impl PlacedItem {
    #[must_use]
    pub fn position(&self) -> Point3 {
        self.pose.position
    }

    /// Rotation about +Y in radians.
    #[must_use]
    pub fn yaw(&self) -> f64 {
        self.pose.yaw
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.pose.scale
    }

    /// World-space bounds of the item's combined shape.
    #[must_use]
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.shape
            .combined_bounds()
            .map(|b| b.transformed(&self.pose))
    }
}
