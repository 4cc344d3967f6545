use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{centroid, signed_area};
use crate::math::Point2;

use super::model::{Corner, RoomGeometry, Wall};
use super::space::Bounds;

/// Ordered, canonically wound floor outline.
///
/// Vertices are `(x, z)` floor points. The signed area (see
/// [`signed_area`]) is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPolygon {
    vertices: Vec<Point2>,
}

impl FloorPolygon {
    /// Wraps a vertex loop, reversing it if needed so the winding is
    /// canonical.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IncompleteGeometry` for fewer than 3 vertices.
    pub fn new(mut vertices: Vec<Point2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::IncompleteGeometry(format!(
                "floor polygon needs at least 3 vertices, got {}",
                vertices.len()
            ))
            .into());
        }
        if signed_area(&vertices) > 0.0 {
            vertices.reverse();
        }
        Ok(Self { vertices })
    }

    /// Walks the wall graph of `geometry` into a floor polygon.
    ///
    /// Starts at the first wall's `from` corner and follows outgoing walls
    /// until the start corner comes back around.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IncompleteGeometry` when the walls do not form
    /// exactly one simple closed cycle: a wall references an unknown corner,
    /// a corner has no outgoing wall, a corner is reached twice before the
    /// loop closes, some walls are left off the loop, or fewer than 3
    /// vertices result.
    pub fn from_geometry(geometry: &RoomGeometry) -> Result<Self> {
        let vertices = trace_wall_loop(&geometry.corners, &geometry.walls)?;
        let polygon = Self::new(vertices)?;
        debug!(
            vertices = polygon.len(),
            area = polygon.signed_area(),
            "traced floor polygon"
        );
        Ok(polygon)
    }

    /// The ordered vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; a built polygon has at least 3 vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Signed shoelace area; negative for the canonical winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Axis-aligned floor bounds of the vertices.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.vertices)
    }

    /// Area-weighted centroid.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolygon` when the signed area is
    /// numerically zero.
    pub fn centroid(&self) -> Result<Point2> {
        centroid(&self.vertices).ok_or_else(|| {
            GeometryError::DegeneratePolygon {
                area: self.signed_area(),
            }
            .into()
        })
    }
}

fn trace_wall_loop(corners: &[Corner], walls: &[Wall]) -> Result<Vec<Point2>> {
    let Some(first) = walls.first() else {
        return Err(GeometryError::IncompleteGeometry("room has no walls".into()).into());
    };

    let by_id: HashMap<&str, &Corner> = corners.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut outgoing: HashMap<&str, &Wall> = HashMap::with_capacity(walls.len());
    for w in walls {
        if outgoing.insert(w.from.as_str(), w).is_some() {
            return Err(GeometryError::IncompleteGeometry(format!(
                "corner {:?} has more than one outgoing wall",
                w.from
            ))
            .into());
        }
    }

    let start = first.from.as_str();
    let mut current = start;
    let mut visited: HashSet<&str> = HashSet::new();
    let mut vertices = Vec::with_capacity(walls.len());

    loop {
        let corner = by_id.get(current).ok_or_else(|| {
            GeometryError::IncompleteGeometry(format!("wall references unknown corner {current:?}"))
        })?;
        visited.insert(current);
        vertices.push(corner.position);

        let wall = outgoing.get(current).ok_or_else(|| {
            GeometryError::IncompleteGeometry(format!("corner {current:?} has no outgoing wall"))
        })?;
        current = wall.to.as_str();

        if current == start {
            break;
        }
        if visited.contains(current) {
            return Err(GeometryError::IncompleteGeometry(format!(
                "wall loop revisits corner {current:?} before closing"
            ))
            .into());
        }
    }

    if vertices.len() < walls.len() {
        return Err(GeometryError::IncompleteGeometry(format!(
            "{} of {} walls are not part of the floor loop",
            walls.len() - vertices.len(),
            walls.len()
        ))
        .into());
    }

    Ok(vertices)
}
