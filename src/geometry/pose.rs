use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};

use crate::math::{Point3, Vector3};

/// Rigid upright placement of an asset: translation, yaw about +Y, and a
/// uniform scale.
///
/// Local points map to world space as `position + R_y(yaw) * (scale * p)`.
/// There is no pitch or roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3,
    pub yaw: f64,
    pub scale: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl Pose {
    /// Creates a pose from position, yaw (radians), and uniform scale.
    #[must_use]
    pub fn new(position: Point3, yaw: f64, scale: f64) -> Self {
        Self {
            position,
            yaw,
            scale,
        }
    }

    /// Rotation part of the pose.
    #[must_use]
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw)
    }

    /// Maps a local point into world space.
    #[must_use]
    pub fn transform_point(&self, p: &Point3) -> Point3 {
        self.position + self.rotation() * (p.coords * self.scale)
    }

    /// Maps a local direction into world space (rotation and scale only).
    #[must_use]
    pub fn transform_vector(&self, v: &Vector3) -> Vector3 {
        self.rotation() * (v * self.scale)
    }

    /// Moves the pose by `delta`.
    pub fn translate(&mut self, delta: &Vector3) {
        self.position += delta;
    }
}
