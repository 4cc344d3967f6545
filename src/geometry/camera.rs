use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{Point2, Point3, Vector3};

use super::Ray;

/// Turns screen-space pointer positions into world rays.
///
/// Implemented by whatever camera the interaction layer drives.
pub trait PointerCaster {
    /// World ray through the screen point (pixels, origin top-left, Y down).
    ///
    /// # Errors
    ///
    /// Returns an error if the camera cannot produce a ray direction.
    fn screen_point_to_ray(&self, screen: Point2) -> Result<Ray>;

    /// Viewing direction of the camera.
    fn forward(&self) -> Vector3;
}

/// A perspective camera with no roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinholeCamera {
    pub position: Point3,
    /// Heading about +Y in radians; 0 looks toward +Z.
    pub yaw: f64,
    /// Elevation in radians; negative looks down.
    pub pitch: f64,
    /// Full vertical field of view in radians.
    pub vertical_fov: f64,
    /// Viewport size in pixels.
    pub viewport: (f64, f64),
}

impl PinholeCamera {
    /// Local +X of the camera in world space.
    #[must_use]
    pub fn right(&self) -> Vector3 {
        let (s, c) = self.yaw.sin_cos();
        Vector3::new(c, 0.0, -s)
    }

    /// Local +Y of the camera in world space.
    #[must_use]
    pub fn up(&self) -> Vector3 {
        self.forward().cross(&self.right())
    }
}

impl PointerCaster for PinholeCamera {
    fn screen_point_to_ray(&self, screen: Point2) -> Result<Ray> {
        let (w, h) = (self.viewport.0.max(1.0), self.viewport.1.max(1.0));
        let ndc_x = 2.0 * screen.x / w - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / h;
        let tan_half = (self.vertical_fov * 0.5).tan();
        let dir = self.forward()
            + self.right() * (ndc_x * tan_half * w / h)
            + self.up() * (ndc_y * tan_half);
        Ray::new(self.position, dir)
    }

    fn forward(&self) -> Vector3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vector3::new(sy * cp, sp, cy * cp)
    }
}
