//! Committed furniture and the gizmo edits applied to it.

use std::f64::consts::TAU;

use slotmap::SlotMap;
use tracing::warn;

use crate::error::{PlacementError, Result, SceneError};
use crate::math::Point3;
use crate::placement::{align_to_floor, snap_xz, PenetrationReport, PlacedItem, PlacementSolver};
use crate::room::{Room, RoomDimensions};

slotmap::new_key_type! {
    /// Unique identifier for a placed item in a [`Furnishings`] arena.
    pub struct ItemId;
}

/// Arena of placed items belonging to one room.
///
/// The arena remembers the room generation it was bound to. Edits against a
/// rebuilt room fail with `PlacementError::StaleRoom` until
/// [`Furnishings::rebind`] is called.
#[derive(Debug)]
pub struct Furnishings {
    items: SlotMap<ItemId, PlacedItem>,
    generation: u64,
}

impl Furnishings {
    /// Creates an empty arena bound to `room`.
    #[must_use]
    pub fn new(room: &Room) -> Self {
        Self {
            items: SlotMap::with_key(),
            generation: room.generation(),
        }
    }

    /// Generation of the room the arena is bound to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Binds the arena to the current build of `room`.
    pub fn rebind(&mut self, room: &Room) {
        self.generation = room.generation();
    }

    /// Stores an item, giving it a collider if it has none.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::StaleRoom` if `room` was rebuilt since the
    /// last bind.
    pub fn insert(&mut self, room: &Room, mut item: PlacedItem) -> Result<ItemId> {
        self.check_room(room)?;
        item.shape.ensure_collider();
        Ok(self.items.insert(item))
    }

    /// Returns the item, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::ItemNotFound` for an unknown or removed id.
    pub fn get(&self, id: ItemId) -> Result<&PlacedItem> {
        Ok(self.items.get(id).ok_or(SceneError::ItemNotFound)?)
    }

    /// Removes and returns the item.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::ItemNotFound` for an unknown or removed id.
    pub fn remove(&mut self, id: ItemId) -> Result<PlacedItem> {
        Ok(self.items.remove(id).ok_or(SceneError::ItemNotFound)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &PlacedItem)> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
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

    fn item_mut(&mut self, id: ItemId) -> Result<&mut PlacedItem> {
        Ok(self.items.get_mut(id).ok_or(SceneError::ItemNotFound)?)
    }

    /// Drags an item to `target`.
    ///
    /// The target is snapped to the solver's move grid and clamped into the
    /// room; the item is then grounded and pushed out of the walls.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::StaleRoom` if the room was rebuilt since the
    /// last bind and `SceneError::ItemNotFound` for an unknown id.
    pub fn move_to(
        &mut self,
        id: ItemId,
        room: &Room,
        target: &Point3,
        solver: &PlacementSolver,
    ) -> Result<PenetrationReport> {
        self.check_room(room)?;
        let item = self.item_mut(id)?;

        let mut position = snap_xz(target, solver.config().move_snap);
        if solver.config().clamp_to_room {
            position = room.space().clamp_to_inside(&position);
        }
        item.pose.position = position;
        align_to_floor(&mut item.pose, &item.shape, room.floor_elevation());

        let report = solver.settle(room, &mut item.pose, &item.shape);
        if !report.converged {
            warn!(asset = %item.asset_id, "moved item still overlaps a wall");
        }
        Ok(report)
    }

    /// Turns an item about +Y by `delta` radians and settles it again.
    ///
    /// # Errors
    ///
    /// Same as [`Furnishings::move_to`].
    pub fn rotate_by(
        &mut self,
        id: ItemId,
        room: &Room,
        delta: f64,
        solver: &PlacementSolver,
    ) -> Result<PenetrationReport> {
        self.check_room(room)?;
        let item = self.item_mut(id)?;

        item.pose.yaw = (item.pose.yaw + delta).rem_euclid(TAU);
        let report = solver.settle(room, &mut item.pose, &item.shape);
        if !report.converged {
            warn!(asset = %item.asset_id, "rotated item still overlaps a wall");
        }
        Ok(report)
    }
}
