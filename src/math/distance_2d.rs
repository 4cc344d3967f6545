use super::Point2;

/// Returns the point on the segment `a → b` closest to `p`.
///
/// The projection parameter is clamped to `[0, 1]`, so the result never lies
/// past either endpoint.
#[must_use]
pub fn closest_point_on_segment(a: &Point2, b: &Point2, p: &Point2) -> Point2 {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Returns the point on a closed polygon's boundary closest to `p`, together
/// with its squared distance.
///
/// Returns `None` for an empty vertex list.
#[must_use]
pub fn closest_point_on_polygon(points: &[Point2], p: &Point2) -> Option<(Point2, f64)> {
    let n = points.len();
    let mut best: Option<(Point2, f64)> = None;
    for i in 0..n {
        let q = closest_point_on_segment(&points[i], &points[(i + 1) % n], p);
        let d = (q - p).norm_squared();
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((q, d));
        }
    }
    best
}
