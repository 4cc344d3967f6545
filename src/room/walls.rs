use std::collections::HashMap;

use crate::geometry::{Aabb, Penetration, YawBox};
use crate::math::{from_xz, yaw_from_direction, Vector3, TOLERANCE};

use super::model::{CardinalLabel, RoomGeometry};

/// A wall as a solid, finite-thickness box standing on the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSlab {
    pub from: String,
    pub to: String,
    pub cardinal: CardinalLabel,
    /// The slab volume; its local Z runs along the wall.
    pub volume: YawBox,
    /// Horizontal unit normal pointing into the room.
    pub inward: Vector3,
}

impl WallSlab {
    /// World-space bounding box of the slab.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        self.volume.aabb()
    }

    /// Translation that moves `item` out of the slab.
    ///
    /// When the shortest way out runs mostly across the wall, the push goes
    /// to the room side of the slab, however deep the item sits. Pushes
    /// along the wall keep the separating-axis result.
    #[must_use]
    pub fn push_out(&self, item: &YawBox) -> Option<Penetration> {
        let pen = item.penetration(&self.volume)?;
        if pen.direction.dot(&self.inward).abs() <= 0.5 {
            return Some(pen);
        }
        let n = self.inward;
        let face = self.volume.center.coords.dot(&n) + self.volume.projected_radius(&n);
        let item_back = item.center.coords.dot(&n) - item.projected_radius(&n);
        Some(Penetration {
            direction: n,
            depth: face - item_back,
        })
    }
}

/// Builds one slab per wall, centered on the wall's centerline and spanning
/// `floor_elevation .. floor_elevation + height`.
///
/// Walls whose corners are unknown or coincide produce no slab. The inward
/// normal comes from the winding of the wall loop.
#[must_use]
pub fn build_wall_slabs(
    geometry: &RoomGeometry,
    floor_elevation: f64,
    height: f64,
    thickness: f64,
) -> Vec<WallSlab> {
    let positions: HashMap<&str, _> = geometry
        .corners
        .iter()
        .map(|c| (c.id.as_str(), c.position))
        .collect();

    // Twice the counter-clockwise area of the loop in (x, z).
    let winding: f64 = geometry
        .walls
        .iter()
        .filter_map(|w| {
            let a = positions.get(w.from.as_str())?;
            let b = positions.get(w.to.as_str())?;
            Some(a.x * b.y - b.x * a.y)
        })
        .sum();
    let interior_on_left = winding >= 0.0;

    geometry
        .walls
        .iter()
        .filter_map(|w| {
            let a = positions.get(w.from.as_str())?;
            let b = positions.get(w.to.as_str())?;
            let a3 = from_xz(a, 0.0);
            let b3 = from_xz(b, 0.0);
            let along = b3 - a3;
            let len = along.norm();
            if len < TOLERANCE {
                return None;
            }
            let mid = nalgebra::center(&a3, &b3);
            let center = mid + Vector3::y() * (floor_elevation + height * 0.5);
            let left = Vector3::new(-along.z, 0.0, along.x) / len;
            let inward = if interior_on_left { left } else { -left };
            Some(WallSlab {
                from: w.from.clone(),
                to: w.to.clone(),
                cardinal: w.cardinal,
                volume: YawBox::new(
                    center,
                    Vector3::new(thickness * 0.5, height * 0.5, len * 0.5),
                    yaw_from_direction(&along),
                ),
                inward,
            })
        })
        .collect()
}
