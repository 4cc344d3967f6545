use super::{Point3, Vector3, TOLERANCE};

/// Relationship of a ray with a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayPlaneRelation {
    /// Ray hits the plane at `point`, `t` units along its direction.
    Point { point: Point3, t: f64 },
    /// Ray is parallel to the plane (does not intersect).
    Parallel,
    /// Ray lies entirely on the plane.
    OnPlane,
    /// The supporting line crosses the plane behind the ray origin.
    Behind { t: f64 },
}

/// Computes the intersection of the ray `origin + t * dir` (`t >= 0`) with
/// the plane through `plane_origin` with normal `normal`.
#[must_use]
pub fn ray_plane_intersect(
    origin: &Point3,
    dir: &Vector3,
    plane_origin: &Point3,
    normal: &Vector3,
) -> RayPlaneRelation {
    let denom = normal.dot(dir);

    let diff = plane_origin - origin;
    let numer = normal.dot(&diff);

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            RayPlaneRelation::OnPlane
        } else {
            RayPlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        if t < 0.0 {
            return RayPlaneRelation::Behind { t };
        }
        let point = origin + dir * t;
        RayPlaneRelation::Point { point, t }
    }
}

/// Intersects a ray with the horizontal plane `y = elevation`.
#[must_use]
pub fn ray_horizontal_plane(origin: &Point3, dir: &Vector3, elevation: f64) -> RayPlaneRelation {
    ray_plane_intersect(
        origin,
        dir,
        &Point3::new(0.0, elevation, 0.0),
        &Vector3::y(),
    )
}
