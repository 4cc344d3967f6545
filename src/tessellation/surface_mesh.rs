use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::math::{Point2, Point3, Vector3};
use crate::room::{Room, RoomDimensions};

use super::TriangleMesh;

/// Smallest span used when normalizing texture coordinates.
const MIN_UV_SPAN: f64 = 0.001;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates the room's floor at floor elevation, facing up.
///
/// # Errors
///
/// Returns `TessellationError::Failed` if the outline cannot be inserted
/// into the triangulation.
pub fn floor_mesh(room: &Room) -> Result<TriangleMesh> {
    surface_mesh(room, room.floor_elevation(), Vector3::y())
}

/// Triangulates the room's ceiling at `floor + height`, facing down.
///
/// # Errors
///
/// Same as [`floor_mesh`].
pub fn ceiling_mesh(room: &Room) -> Result<TriangleMesh> {
    surface_mesh(
        room,
        room.floor_elevation() + room.room_height_meters(),
        -Vector3::y(),
    )
}

#[allow(clippy::cast_possible_truncation)]
fn surface_mesh(room: &Room, elevation: f64, normal: Vector3) -> Result<TriangleMesh> {
    let polygon = room
        .space()
        .polygon()
        .ok_or_else(|| TessellationError::Failed("room has no floor polygon".into()))?;
    let outline: Vec<_> = polygon
        .vertices()
        .iter()
        .map(|p| SpadePoint2::new(p.x, p.y))
        .collect();

    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, &outline)?;
    let interior = classify_interior_faces(&cdt);

    let bounds = room.space().bounds();
    let span_x = bounds.width().max(MIN_UV_SPAN);
    let span_z = bounds.depth().max(MIN_UV_SPAN);
    // Spade yields triangles counter-clockwise in (x, z), whose geometric
    // normal points down.
    let flip = normal.y > 0.0;

    let mut mesh = TriangleMesh::default();
    let mut vertex_map: HashMap<usize, u32> = HashMap::new();

    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let mut tri = [0u32; 3];
        for (slot, vh) in face.vertices().iter().enumerate() {
            let key = vh.fix().index();
            tri[slot] = *vertex_map.entry(key).or_insert_with(|| {
                let p = vh.position();
                mesh.vertices.push(Point3::new(p.x, elevation, p.y));
                mesh.normals.push(normal);
                mesh.uvs.push(Point2::new(
                    (p.x - bounds.min_x) / span_x,
                    (p.y - bounds.min_z) / span_z,
                ));
                (mesh.vertices.len() - 1) as u32
            });
        }
        if flip {
            tri.swap(1, 2);
        }
        mesh.indices.push(tri);
    }

    debug!(
        elevation,
        vertices = mesh.vertices.len(),
        triangles = mesh.indices.len(),
        "tessellated room surface"
    );
    Ok(mesh)
}

fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Marks the inner faces lying inside the constraint loop.
///
/// Flood-fills from the faces touching the outer face; crossing a
/// constraint edge flips inside and outside.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer {
            continue;
        }
        let Some(inner) = edge.rev().face().as_inner() else {
            continue;
        };
        let idx = inner.fix().index();
        if depth_map.contains_key(&idx) {
            continue;
        }
        let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
        depth_map.insert(idx, depth);
        if depth % 2 == 1 {
            interior.insert(idx);
        }
        queue.push_back((inner.fix(), depth));
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let next = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, next);
            if next % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((neighbor.fix(), next));
        }
    }

    interior
}
