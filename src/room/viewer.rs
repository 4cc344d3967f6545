use serde::{Deserialize, Serialize};

use crate::math::Point3;

use super::{Room, RoomDimensions};

/// Keeps a free-roaming viewer inside the room volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerClamp {
    /// Half of the viewer's body height.
    pub half_height: f64,
    /// Collision skin kept between the viewer and floor or ceiling.
    pub skin: f64,
    pub epsilon: f64,
}

impl Default for ViewerClamp {
    fn default() -> Self {
        Self {
            half_height: 0.8,
            skin: 0.05,
            epsilon: 0.002,
        }
    }
}

impl ViewerClamp {
    /// Clamps `position` between floor and ceiling and inside the floor
    /// outline.
    ///
    /// A room too low for the viewer pins it halfway between the limits.
    #[must_use]
    pub fn clamp(&self, room: &Room, position: &Point3) -> Point3 {
        let floor = room.floor_elevation();
        let margin = self.half_height + self.skin + self.epsilon;
        let min_y = floor + margin;
        let max_y = floor + room.room_height_meters() - margin;
        let y = if max_y >= min_y {
            position.y.clamp(min_y, max_y)
        } else {
            (min_y + max_y) * 0.5
        };

        let mut inside = room.space().clamp_to_inside(position);
        inside.y = y;
        inside
    }
}
