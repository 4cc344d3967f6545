use super::{Point2, TOLERANCE};

/// Computes the signed area of a floor polygon in the XZ plane.
///
/// Uses the shoelace sum of `x[i+1] * z[i] - x[i] * z[i+1]`, so loops that
/// turn counter-clockwise in `(x, z)` come out negative. That negative sign
/// is the canonical winding for floor polygons.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += cross_term(&points[i], &points[j]);
    }
    sum * 0.5
}

/// Signed-area-weighted centroid of a simple polygon.
///
/// Returns `None` when the signed area is numerically zero, since the
/// formula divides by it.
#[must_use]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    let area = signed_area(points);
    if area.abs() < TOLERANCE {
        return None;
    }
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let c = cross_term(a, b);
        cx += (a.x + b.x) * c;
        cy += (a.y + b.y) * c;
    }
    let k = 1.0 / (6.0 * area);
    Some(Point2::new(cx * k, cy * k))
}

/// Orientation of `p` relative to the directed segment `a → b`.
///
/// Positive when `p` is to the left (counter-clockwise), negative to the
/// right, zero when collinear.
#[must_use]
pub fn orient(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// Returns `true` if `p` lies on the closed segment `a → b`.
///
/// The collinearity test is scaled by the segment length so that points
/// produced by projecting onto the segment are always accepted.
#[must_use]
pub fn on_segment(a: &Point2, b: &Point2, p: &Point2) -> bool {
    let len = (b - a).norm();
    if len < TOLERANCE {
        return (p - a).norm() < TOLERANCE;
    }
    if orient(a, b, p).abs() > 1e-9 * len.max(1.0) {
        return false;
    }
    let eps = 1e-9;
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// Point-in-polygon test using the winding number.
///
/// Crossings are decided with orientation predicates instead of an
/// interpolated intersection, so near-horizontal edges need no epsilon in a
/// denominator. Points on the boundary count as inside.
#[must_use]
pub fn contains(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut winding = 0_i32;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        if on_segment(a, b, p) {
            return true;
        }
        if a.y <= p.y {
            if b.y > p.y && orient(a, b, p) > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && orient(a, b, p) < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

fn cross_term(a: &Point2, b: &Point2) -> f64 {
    b.x * a.y - a.x * b.y
}
