use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::intersect_3d::{ray_horizontal_plane, RayPlaneRelation};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A half-line defined by an origin point and a unit direction.
///
/// The parametric form is: `P(t) = origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Creates a new ray from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the origin point of the ray.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the ray.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Evaluates the ray at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Where the ray meets the horizontal plane `y = elevation`, if it does
    /// in front of its origin.
    #[must_use]
    pub fn hit_horizontal_plane(&self, elevation: f64) -> Option<Point3> {
        match ray_horizontal_plane(&self.origin, &self.direction, elevation) {
            RayPlaneRelation::Point { point, .. } => Some(point),
            RayPlaneRelation::OnPlane => Some(Point3::new(self.origin.x, elevation, self.origin.z)),
            RayPlaneRelation::Parallel | RayPlaneRelation::Behind { .. } => None,
        }
    }
}
