use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{PlacementError, Result};
use crate::geometry::{PointerCaster, Pose, Ray};
use crate::math::{yaw_from_direction, Point2, Point3, Vector3};
use crate::room::{Room, RoomDimensions};

use super::asset::{AssetCatalog, AssetDescriptor, AssetShape};
use super::category::target_height;
use super::config::{PlacementConfig, YawPolicy};
use super::item::PlacedItem;
use super::penetration::{overlapping_walls, resolve_wall_penetration, PenetrationReport};
use super::scale::{fit_to_room, scale_to_height};

/// Non-fatal conditions met while placing an item.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum PlacementWarning {
    #[error("still overlapping a wall after {iterations} push-out iterations")]
    UnresolvedPenetration { iterations: usize },

    #[error("asset has no bounds; a unit cube stands in for it")]
    EmptyShape,
}

/// Result of a resolved gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOutcome {
    pub item: PlacedItem,
    pub penetration: PenetrationReport,
    pub warnings: Vec<PlacementWarning>,
}

/// Where a gesture stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    /// The pointer hits the floor at `hit`.
    Targeting { hit: Point3 },
    Resolved,
    /// The last pointer ray missed the floor. Retargeting is allowed.
    Rejected,
}

impl GesturePhase {
    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Targeting { .. } => "targeting",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

/// One drag-and-drop placement, bound to the room build it started on.
///
/// Nothing is committed until [`PlacementGesture::resolve`] returns, so a
/// gesture dropped in any earlier phase has no effect.
#[derive(Debug, Clone)]
pub struct PlacementGesture {
    generation: u64,
    phase: GesturePhase,
    viewer_forward: Option<Vector3>,
    pointer_direction: Option<Vector3>,
}

impl PlacementGesture {
    /// Starts an idle gesture on the current build of `room`.
    #[must_use]
    pub fn begin(room: &Room) -> Self {
        Self {
            generation: room.generation(),
            phase: GesturePhase::Idle,
            viewer_forward: None,
            pointer_direction: None,
        }
    }

    /// Sets the viewer's look direction for [`YawPolicy::Viewer`].
    ///
    /// Without it the pointer ray direction is used.
    #[must_use]
    pub fn with_viewer_forward(mut self, forward: Vector3) -> Self {
        self.viewer_forward = Some(forward);
        self
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Room generation the gesture was started on.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn check_room(&self, room: &Room) -> Result<()> {
        if room.generation() == self.generation {
            Ok(())
        } else {
            Err(PlacementError::StaleRoom {
                gesture: self.generation,
                room: room.generation(),
            }
            .into())
        }
    }

    /// Intersects `ray` with the floor plane.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::NoIntersection` when the ray is parallel to
    /// the floor or points away from it; the gesture moves to
    /// [`GesturePhase::Rejected`] and may be retargeted.
    /// Returns `PlacementError::StaleRoom` if the room was rebuilt, and
    /// `PlacementError::InvalidPhase` on a resolved gesture.
    pub fn target(&mut self, room: &Room, ray: &Ray) -> Result<Point3> {
        self.check_room(room)?;
        if self.phase == GesturePhase::Resolved {
            return Err(PlacementError::InvalidPhase {
                expected: "idle, targeting or rejected",
                found: self.phase.name(),
            }
            .into());
        }

        if let Some(hit) = ray.hit_horizontal_plane(room.floor_elevation()) {
            self.phase = GesturePhase::Targeting { hit };
            self.pointer_direction = Some(*ray.direction());
            Ok(hit)
        } else {
            self.phase = GesturePhase::Rejected;
            Err(PlacementError::NoIntersection.into())
        }
    }

    /// Runs the placement pipeline on the current target.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::StaleRoom` if the room was rebuilt,
    /// `PlacementError::InvalidPhase` unless the gesture is targeting, and
    /// `PlacementError::UnknownAsset` if `catalog` lacks the asset.
    pub fn resolve<C: AssetCatalog + ?Sized>(
        &mut self,
        room: &Room,
        solver: &PlacementSolver,
        asset: &AssetDescriptor,
        catalog: &C,
    ) -> Result<PlacementOutcome> {
        self.check_room(room)?;
        let GesturePhase::Targeting { hit } = self.phase else {
            return Err(PlacementError::InvalidPhase {
                expected: "targeting",
                found: self.phase.name(),
            }
            .into());
        };
        let shape = catalog
            .shape(&asset.id)
            .ok_or_else(|| PlacementError::UnknownAsset(asset.id.clone()))?;

        let forward = self
            .viewer_forward
            .or(self.pointer_direction)
            .unwrap_or_else(|| room.space().forward());
        let outcome = solver.solve(room, hit, &forward, asset, shape);
        self.phase = GesturePhase::Resolved;
        Ok(outcome)
    }
}

/// Turns a floor hit and an asset into an upright, scaled, wall-free
/// [`PlacedItem`].
#[derive(Debug, Clone, Default)]
pub struct PlacementSolver {
    config: PlacementConfig,
}

impl PlacementSolver {
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Runs a whole gesture for `ray` in one call.
    ///
    /// # Errors
    ///
    /// See [`PlacementGesture::target`] and [`PlacementGesture::resolve`].
    pub fn place<C: AssetCatalog + ?Sized>(
        &self,
        room: &Room,
        ray: &Ray,
        viewer_forward: Vector3,
        asset: &AssetDescriptor,
        catalog: &C,
    ) -> Result<PlacementOutcome> {
        let mut gesture = PlacementGesture::begin(room).with_viewer_forward(viewer_forward);
        gesture.target(room, ray)?;
        gesture.resolve(room, self, asset, catalog)
    }

    /// Casts `screen` through `caster` and places the asset where it lands.
    ///
    /// # Errors
    ///
    /// As [`PlacementSolver::place`], plus any casting failure.
    pub fn place_at_pointer<P, C>(
        &self,
        room: &Room,
        caster: &P,
        screen: Point2,
        asset: &AssetDescriptor,
        catalog: &C,
    ) -> Result<PlacementOutcome>
    where
        P: PointerCaster + ?Sized,
        C: AssetCatalog + ?Sized,
    {
        let ray = caster.screen_point_to_ray(screen)?;
        self.place(room, &ray, caster.forward(), asset, catalog)
    }

    /// Upright yaw for a new item, in radians.
    ///
    /// The facing direction is flattened onto the floor; a near-vertical one
    /// falls back to +Z.
    #[must_use]
    pub fn facing_yaw(&self, room: &Room, viewer_forward: &Vector3) -> f64 {
        let facing = match self.config.yaw_policy {
            YawPolicy::RoomForward => room.space().forward(),
            YawPolicy::Viewer => *viewer_forward,
        };
        let mut flat = Vector3::new(facing.x, 0.0, facing.z);
        if flat.norm_squared() < 1e-4 {
            flat = Vector3::z();
        }

        let mut degrees = yaw_from_direction(&flat).to_degrees();
        let step = self.config.yaw_snap_degrees;
        if step > 0.01 {
            degrees = (degrees / step).round() * step;
        }
        (degrees + self.config.yaw_offset_degrees).to_radians()
    }

    fn solve(
        &self,
        room: &Room,
        hit: Point3,
        viewer_forward: &Vector3,
        asset: &AssetDescriptor,
        mut shape: AssetShape,
    ) -> PlacementOutcome {
        let cfg = &self.config;
        let mut warnings = Vec::new();

        let position = if cfg.clamp_to_room {
            room.space().clamp_to_inside(&hit)
        } else {
            hit
        };
        let mut pose = Pose::new(position, self.facing_yaw(room, viewer_forward), 1.0);

        match shape.combined_bounds() {
            Some(local) => {
                if cfg.realistic_scale {
                    let target = target_height(&asset.category, cfg.max_height);
                    scale_to_height(&mut pose, &local, target, cfg.scale_range);
                }
                if cfg.auto_scale {
                    fit_to_room(
                        &mut pose,
                        &local,
                        room.space().bounds(),
                        cfg.min_height,
                        cfg.max_height,
                        cfg.max_footprint_fraction,
                    );
                }
            }
            None => warnings.push(PlacementWarning::EmptyShape),
        }

        shape.ensure_collider();
        align_to_floor(&mut pose, &shape, room.floor_elevation());

        if let Some(step) = cfg.grid_snap {
            pose.position = snap_xz(&pose.position, step);
        }

        let penetration = self.settle(room, &mut pose, &shape);
        if !penetration.converged {
            warn!(
                asset = %asset.id,
                iterations = penetration.iterations,
                "placement still overlaps a wall"
            );
            warnings.push(PlacementWarning::UnresolvedPenetration {
                iterations: penetration.iterations,
            });
        }

        debug!(
            asset = %asset.id,
            x = pose.position.x,
            z = pose.position.z,
            yaw = pose.yaw,
            scale = pose.scale,
            "placed item"
        );

        PlacementOutcome {
            item: PlacedItem {
                asset_id: asset.id.clone(),
                category: asset.category.clone(),
                pose,
                shape,
            },
            penetration,
            warnings,
        }
    }

    /// Pushes `pose` out of the walls, then pulls it back into the room and
    /// onto the floor. `converged` describes the pose as it is left.
    pub fn settle(&self, room: &Room, pose: &mut Pose, shape: &AssetShape) -> PenetrationReport {
        let mut report = resolve_wall_penetration(
            pose,
            &shape.colliders,
            room.slabs(),
            self.config.max_penetration_iterations,
            self.config.penetration_margin,
        );
        if self.config.clamp_to_room {
            pose.position = room.space().clamp_to_inside(&pose.position);
        }
        align_to_floor(pose, shape, room.floor_elevation());
        report.converged = overlapping_walls(pose, &shape.colliders, room.slabs()) == 0;
        report
    }
}

/// Lifts or lowers `pose` so the bottom of the shape rests on `floor`.
pub fn align_to_floor(pose: &mut Pose, shape: &AssetShape, floor: f64) {
    if let Some(local) = shape.combined_bounds() {
        let bottom = local.transformed(pose).min.y;
        pose.position.y += floor - bottom;
    }
}

/// Rounds X and Z to multiples of `step`; non-positive steps do nothing.
#[must_use]
pub fn snap_xz(p: &Point3, step: f64) -> Point3 {
    if step <= 0.0 {
        return *p;
    }
    Point3::new((p.x / step).round() * step, p.y, (p.z / step).round() * step)
}
