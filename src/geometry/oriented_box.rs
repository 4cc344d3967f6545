//! Boxes rotated about the vertical axis and their penetration query.
//!
//! Walls and placed assets are both upright, so the separating-axis test
//! reduces to the two horizontal edge normals of each box plus an interval
//! check on Y.

use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Aabb, Pose};

/// A box rotated about +Y only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YawBox {
    /// World-space center.
    pub center: Point3,
    /// Half size along the box's local axes.
    pub half_extents: Vector3,
    /// Rotation about +Y in radians.
    pub yaw: f64,
}

/// Minimum translation separating two boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit direction to move the first box along.
    pub direction: Vector3,
    /// Overlap depth along `direction`.
    pub depth: f64,
}

impl Penetration {
    /// The translation vector `direction * depth`.
    #[must_use]
    pub fn vector(&self) -> Vector3 {
        self.direction * self.depth
    }
}

impl YawBox {
    /// Creates a box from center, half extents, and yaw.
    #[must_use]
    pub fn new(center: Point3, half_extents: Vector3, yaw: f64) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
            yaw,
        }
    }

    /// World-space box for a local axis-aligned box placed with `pose`.
    #[must_use]
    pub fn from_local(local: &Aabb, pose: &Pose) -> Self {
        Self::new(
            pose.transform_point(&local.center()),
            local.half_extents() * pose.scale,
            pose.yaw,
        )
    }

    /// The box's local X and Z axes in world space.
    #[must_use]
    pub fn horizontal_axes(&self) -> [Vector3; 2] {
        let (s, c) = self.yaw.sin_cos();
        [Vector3::new(c, 0.0, -s), Vector3::new(s, 0.0, c)]
    }

    /// Half-width of the box's shadow on a horizontal unit `axis`.
    #[must_use]
    pub fn projected_radius(&self, axis: &Vector3) -> f64 {
        let [ax, az] = self.horizontal_axes();
        self.half_extents.x * ax.dot(axis).abs() + self.half_extents.z * az.dot(axis).abs()
    }

    /// Axis-aligned box enclosing this box.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let rx = self.projected_radius(&Vector3::x());
        let rz = self.projected_radius(&Vector3::z());
        let half = Vector3::new(rx, self.half_extents.y, rz);
        Aabb {
            min: self.center - half,
            max: self.center + half,
        }
    }

    /// Computes the horizontal minimum translation that moves `self` out of
    /// `other`.
    ///
    /// Returns `None` when the interiors do not overlap; touching is not an
    /// overlap.
    #[must_use]
    pub fn penetration(&self, other: &YawBox) -> Option<Penetration> {
        let dy = (self.center.y - other.center.y).abs();
        if dy >= self.half_extents.y + other.half_extents.y - TOLERANCE {
            return None;
        }

        let offset = self.center - other.center;
        let mut best: Option<Penetration> = None;

        for axis in self.horizontal_axes().iter().chain(other.horizontal_axes().iter()) {
            let dist = offset.dot(axis);
            let overlap = self.projected_radius(axis) + other.projected_radius(axis) - dist.abs();
            if overlap <= TOLERANCE {
                return None;
            }
            if best.is_none_or(|b| overlap < b.depth) {
                let direction = if dist < 0.0 { -axis } else { *axis };
                best = Some(Penetration {
                    direction,
                    depth: overlap,
                });
            }
        }

        best
    }
}
