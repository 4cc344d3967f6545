//! Pushing placed assets out of wall volumes.

use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Penetration, Pose, YawBox};
use crate::math::Vector3;
use crate::room::WallSlab;

/// How the bounded push-out loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PenetrationReport {
    /// Iterations that found and pushed out of at least one wall.
    pub iterations: usize,
    /// `true` when the final pose overlaps no wall.
    pub converged: bool,
    /// Total horizontal displacement applied.
    pub moved: Vector3,
}

fn overlaps(collider: &YawBox, slabs: &[WallSlab]) -> Vec<Penetration> {
    let bounds = collider.aabb();
    slabs
        .iter()
        .filter(|s| s.aabb().intersects(&bounds, 0.0))
        .filter_map(|s| s.push_out(collider))
        .collect()
}

/// Number of collider/slab pairs that overlap with `pose`.
#[must_use]
pub fn overlapping_walls(pose: &Pose, colliders: &[Aabb], slabs: &[WallSlab]) -> usize {
    colliders
        .iter()
        .map(|local| overlaps(&YawBox::from_local(local, pose), slabs).len())
        .sum()
}

/// Moves `pose` out of every wall slab its colliders overlap.
///
/// Each iteration checks every collider against every slab and translates
/// by each push-out vector plus `margin`; pushes across a wall always point
/// into the room. Stops at the first iteration with nothing to push, or
/// after `max_iterations`.
pub fn resolve_wall_penetration(
    pose: &mut Pose,
    colliders: &[Aabb],
    slabs: &[WallSlab],
    max_iterations: usize,
    margin: f64,
) -> PenetrationReport {
    let mut report = PenetrationReport::default();

    for _ in 0..max_iterations {
        let mut pushed = false;
        for local in colliders {
            let world = YawBox::from_local(local, pose);
            for pen in overlaps(&world, slabs) {
                let step = pen.direction * (pen.depth + margin);
                pose.translate(&step);
                report.moved += step;
                pushed = true;
            }
        }
        if !pushed {
            report.converged = true;
            return report;
        }
        report.iterations += 1;
    }

    report.converged = overlapping_walls(pose, colliders, slabs) == 0;
    report
}
