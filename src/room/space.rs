use crate::error::{GeometryError, Result};
use crate::math::distance_2d::closest_point_on_polygon;
use crate::math::polygon_2d::contains;
use crate::math::{from_xz, to_xz, Point2, Point3, Vector3};

use super::polygon::FloorPolygon;

/// Axis-aligned floor bounds `[min_x, max_x] x [min_z, max_z]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Creates bounds from explicit extents, swapping any inverted pair.
    #[must_use]
    pub fn new(min_x: f64, max_x: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            min_z: min_z.min(max_z),
            max_z: min_z.max(max_z),
        }
    }

    /// Bounds of a point set; all-NaN (invalid) when `points` is empty.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        };
        points.iter().skip(1).fold(
            Self::new(first.x, first.x, first.y, first.y),
            |b, p| Self {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_z: b.min_z.min(p.y),
                max_z: b.max_z.max(p.y),
            },
        )
    }

    /// Returns `true` if the extents are finite numbers with positive span.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_z, self.max_z]
            .iter()
            .all(|v| !v.is_nan())
            && self.max_x > self.min_x
            && self.max_z > self.min_z
    }

    /// Span along X.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).abs()
    }

    /// Span along Z.
    #[must_use]
    pub fn depth(&self) -> f64 {
        (self.max_z - self.min_z).abs()
    }

    /// Midpoint of the bounds.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_z && p.y <= self.max_z
    }

    /// Clamps each coordinate into the bounds. NaN extents leave that
    /// coordinate unclamped.
    #[must_use]
    pub fn clamp(&self, p: &Point2) -> Point2 {
        Point2::new(
            p.x.max(self.min_x).min(self.max_x),
            p.y.max(self.min_z).min(self.max_z),
        )
    }
}

/// Horizontal spatial-query structure for one room.
///
/// Answers containment and clamping queries on the floor plane. Every point
/// it returns sits at the room's floor elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSpace {
    polygon: Option<FloorPolygon>,
    bounds: Bounds,
    floor_elevation: f64,
    forward: Vector3,
}

impl RoomSpace {
    /// Builds the query structure from a traced floor polygon.
    #[must_use]
    pub fn new(polygon: FloorPolygon, floor_elevation: f64) -> Self {
        let bounds = polygon.bounds();
        Self {
            polygon: Some(polygon),
            bounds,
            floor_elevation,
            forward: Vector3::z(),
        }
    }

    /// A room known only by its bounds, before any scan produced a polygon.
    #[must_use]
    pub fn from_bounds(bounds: Bounds, floor_elevation: f64) -> Self {
        Self {
            polygon: None,
            bounds,
            floor_elevation,
            forward: Vector3::z(),
        }
    }

    /// Sets the room's canonical forward direction.
    #[must_use]
    pub fn with_forward(mut self, forward: Vector3) -> Self {
        self.forward = forward;
        self
    }

    /// The floor polygon, if one has been built.
    #[must_use]
    pub fn polygon(&self) -> Option<&FloorPolygon> {
        self.polygon.as_ref()
    }

    /// Returns `true` if a polygon with at least 3 vertices is set.
    #[must_use]
    pub fn has_polygon(&self) -> bool {
        self.polygon.as_ref().is_some_and(|p| p.len() >= 3)
    }

    /// Axis-aligned bounds of the floor.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Elevation of the floor plane.
    #[must_use]
    pub fn floor_elevation(&self) -> f64 {
        self.floor_elevation
    }

    /// The room's canonical forward direction.
    #[must_use]
    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    /// Is the world point inside the room, looking only at X and Z?
    ///
    /// Uses the polygon when available and the bounds otherwise. Points on
    /// the boundary are inside.
    #[must_use]
    pub fn contains_xz(&self, point: &Point3) -> bool {
        let p = to_xz(point);
        match self.polygon.as_ref().filter(|_| self.has_polygon()) {
            Some(poly) => contains(poly.vertices(), &p),
            None => self.bounds.contains(&p),
        }
    }

    /// Pulls a world point into the room and onto the floor.
    ///
    /// Inside points keep their X and Z. Outside points move to the nearest
    /// point on the polygon boundary, or are clamped to the bounds when no
    /// polygon is set. The result always satisfies [`Self::contains_xz`].
    #[must_use]
    pub fn clamp_to_inside(&self, point: &Point3) -> Point3 {
        let p = to_xz(point);
        let q = match self.polygon.as_ref().filter(|_| self.has_polygon()) {
            Some(poly) if contains(poly.vertices(), &p) => p,
            Some(poly) => closest_point_on_polygon(poly.vertices(), &p).map_or(p, |(q, _)| q),
            None => self.bounds.clamp(&p),
        };
        from_xz(&q, self.floor_elevation)
    }

    /// Area-weighted centroid of the floor, at floor elevation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolygon` when the polygon has zero
    /// area, or `GeometryError::IncompleteGeometry` when no polygon is set.
    pub fn centroid(&self) -> Result<Point3> {
        let poly = self
            .polygon
            .as_ref()
            .ok_or_else(|| GeometryError::IncompleteGeometry("room has no floor polygon".into()))?;
        Ok(from_xz(&poly.centroid()?, self.floor_elevation))
    }

    /// A good default spot to spawn things: the centroid when it is defined
    /// and inside the room, otherwise the bounds midpoint, clamped inside.
    #[must_use]
    pub fn spawn_point(&self) -> Point3 {
        match self.centroid() {
            Ok(c) if self.contains_xz(&c) => c,
            _ => self.clamp_to_inside(&from_xz(&self.bounds.center(), self.floor_elevation)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RoomError;
    use approx::assert_relative_eq;

    fn p2(x: f64, z: f64) -> Point2 {
        Point2::new(x, z)
    }

    fn p3(x: f64, z: f64) -> Point3 {
        Point3::new(x, 7.0, z)
    }

    fn square_room() -> RoomSpace {
        let poly = FloorPolygon::new(vec![p2(0.0, 0.0), p2(4.0, 0.0), p2(4.0, 4.0), p2(0.0, 4.0)])
            .unwrap();
        RoomSpace::new(poly, 0.05)
    }

    fn l_room() -> RoomSpace {
        let poly = FloorPolygon::new(vec![
            p2(0.0, 0.0),
            p2(4.0, 0.0),
            p2(4.0, 2.0),
            p2(2.0, 2.0),
            p2(2.0, 4.0),
            p2(0.0, 4.0),
        ])
        .unwrap();
        RoomSpace::new(poly, 0.0)
    }

    #[test]
    fn strict_interior_and_exterior() {
        let room = square_room();
        for &(x, z) in &[(0.1, 0.1), (2.0, 2.0), (3.9, 0.5), (1.0, 3.99)] {
            assert!(room.contains_xz(&p3(x, z)), "({x}, {z})");
        }
        for &(x, z) in &[(-0.1, 2.0), (4.1, 2.0), (2.0, -0.01), (6.0, 6.0)] {
            assert!(!room.contains_xz(&p3(x, z)), "({x}, {z})");
        }
    }

    #[test]
    fn edges_are_consistently_inside() {
        let room = square_room();
        for &(x, z) in &[(0.0, 2.0), (4.0, 2.0), (2.0, 0.0), (2.0, 4.0), (4.0, 4.0)] {
            assert!(room.contains_xz(&p3(x, z)), "({x}, {z})");
        }
    }

    #[test]
    fn clamp_keeps_inside_points_and_forces_floor() {
        let room = square_room();
        let q = room.clamp_to_inside(&p3(1.0, 3.0));
        assert_relative_eq!(q, Point3::new(1.0, 0.05, 3.0));
    }

    #[test]
    fn clamp_projects_onto_edge_interior() {
        let room = square_room();
        let q = room.clamp_to_inside(&p3(6.0, 1.5));
        assert_relative_eq!(q, Point3::new(4.0, 0.05, 1.5), epsilon = 1e-12);
        assert!(room.contains_xz(&q));
    }

    #[test]
    fn clamp_is_idempotent_and_contained() {
        let room = l_room();
        let samples = [
            (5.0, 5.0),
            (3.0, 3.0),
            (-2.0, 1.0),
            (2.5, 2.0001),
            (1.0, 9.0),
            (4.0, -3.0),
            (1.0, 1.0),
        ];
        for &(x, z) in &samples {
            let once = room.clamp_to_inside(&p3(x, z));
            let twice = room.clamp_to_inside(&once);
            assert_relative_eq!(once, twice);
            assert!(room.contains_xz(&once), "({x}, {z}) -> {once}");
        }
    }

    #[test]
    fn concave_notch_clamps_to_inner_corner_edges() {
        let room = l_room();
        let q = room.clamp_to_inside(&p3(3.0, 2.5));
        // Nearest boundary is the notch edge z = 2.
        assert_relative_eq!(q.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(q.z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn bounds_fallback_without_polygon() {
        let room = RoomSpace::from_bounds(Bounds::new(-1.0, 1.0, -2.0, 2.0), 0.0);
        assert!(!room.has_polygon());
        assert!(room.contains_xz(&p3(0.5, 1.9)));
        assert!(!room.contains_xz(&p3(1.5, 0.0)));
        let q = room.clamp_to_inside(&p3(3.0, -5.0));
        assert_relative_eq!(q, Point3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn inverted_bounds_are_sorted_before_clamping() {
        let b = Bounds::new(1.0, -1.0, 2.0, -2.0);
        assert_eq!(b, Bounds::new(-1.0, 1.0, -2.0, 2.0));
        assert!(b.is_valid());

        let room = RoomSpace::from_bounds(b, 0.0);
        let q = room.clamp_to_inside(&p3(3.0, -5.0));
        assert_relative_eq!(q, Point3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn empty_bounds_leave_points_unclamped() {
        let b = Bounds::from_points(&[]);
        assert!(!b.is_valid());
        let p = b.clamp(&p2(3.0, -5.0));
        assert_relative_eq!(p, p2(3.0, -5.0));
    }

    #[test]
    fn centroid_and_spawn_point() {
        let room = square_room();
        assert_relative_eq!(room.centroid().unwrap(), Point3::new(2.0, 0.05, 2.0), epsilon = 1e-12);
        assert_relative_eq!(room.spawn_point(), Point3::new(2.0, 0.05, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn spawn_point_falls_back_to_bounds_midpoint() {
        let poly = FloorPolygon::new(vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(2.0, 0.0)]).unwrap();
        let room = RoomSpace::new(poly, 0.0);
        assert!(matches!(
            room.centroid(),
            Err(RoomError::Geometry(GeometryError::DegeneratePolygon { .. }))
        ));
        assert!(!room.bounds().is_valid());
        let s = room.spawn_point();
        assert_relative_eq!(s, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn bounds_match_polygon() {
        let room = l_room();
        let rebuilt = room.polygon().unwrap().bounds();
        assert_eq!(*room.bounds(), rebuilt);
        assert!(rebuilt.is_valid());
        assert_relative_eq!(rebuilt.width(), 4.0);
    }
}
