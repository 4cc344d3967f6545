pub mod distance_2d;
pub mod intersect_3d;
pub mod polygon_2d;

/// 2D point type.
///
/// Floor-plane points use `x` for world X and `y` for world Z.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (Y up).
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Drops the vertical coordinate of a world point, keeping `(x, z)`.
#[must_use]
pub fn to_xz(p: &Point3) -> Point2 {
    Point2::new(p.x, p.z)
}

/// Lifts a floor-plane point back to world space at elevation `y`.
#[must_use]
pub fn from_xz(p: &Point2, y: f64) -> Point3 {
    Point3::new(p.x, y, p.y)
}

/// Converts a horizontal direction into a yaw angle about +Y.
///
/// Yaw 0 faces +Z; positive yaw turns +Z toward +X.
#[must_use]
pub fn yaw_from_direction(dir: &Vector3) -> f64 {
    dir.x.atan2(dir.z)
}

/// Unit direction on the floor plane for a yaw angle.
#[must_use]
pub fn direction_from_yaw(yaw: f64) -> Vector3 {
    Vector3::new(yaw.sin(), 0.0, yaw.cos())
}
