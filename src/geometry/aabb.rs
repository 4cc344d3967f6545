use serde::{Deserialize, Serialize};

use crate::math::{Point3, Vector3};

use super::Pose;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a box from two opposite corners in any order.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates a box from its center and full size.
    #[must_use]
    pub fn from_center_size(center: Point3, size: Vector3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Union of all `boxes`, or `None` if there are none.
    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a Aabb>) -> Option<Self> {
        boxes.into_iter().copied().reduce(|a, b| a.union(&b))
    }

    /// Grows the box to include `p`.
    #[must_use]
    pub fn encapsulate(&self, p: &Point3) -> Self {
        Self {
            min: self.min.inf(p),
            max: self.max.sup(p),
        }
    }

    /// Smallest box enclosing both boxes.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Full size along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Half size along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vector3 {
        self.size() * 0.5
    }

    /// The eight corner points.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// Returns `true` if the boxes overlap after growing `self` by `pad` on
    /// every side. Touching counts as overlapping.
    #[must_use]
    pub fn intersects(&self, other: &Aabb, pad: f64) -> bool {
        self.min.x - pad <= other.max.x
            && self.max.x + pad >= other.min.x
            && self.min.y - pad <= other.max.y
            && self.max.y + pad >= other.min.y
            && self.min.z - pad <= other.max.z
            && self.max.z + pad >= other.min.z
    }

    /// World-space box enclosing this local box after applying `pose`.
    #[must_use]
    pub fn transformed(&self, pose: &Pose) -> Self {
        let corners = self.corners().map(|c| pose.transform_point(&c));
        // Eight corners always exist, so the fold starts from the first one.
        let first = corners[0];
        corners[1..]
            .iter()
            .fold(Self { min: first, max: first }, |b, p| b.encapsulate(p))
    }
}
