#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use approx::assert_relative_eq;
use roomkit::geometry::{Aabb, PinholeCamera, Ray};
use roomkit::math::{Point2, Point3, Vector3};
use roomkit::placement::{
    overlapping_walls, AssetDescriptor, AssetShape, GesturePhase, PlacedItem, PlacementGesture,
    PlacementSolver,
};
use roomkit::room::{Corner, FloorPolygon, Room, RoomConfig, RoomGeometry};
use roomkit::scene::Furnishings;
use roomkit::tessellation::{ceiling_mesh, floor_mesh};

fn square_room(size: f64) -> Room {
    let g = RoomGeometry::from_loop(
        2.5,
        vec![
            Corner::new("A", 0.0, 0.0),
            Corner::new("B", size, 0.0),
            Corner::new("C", size, size),
            Corner::new("D", 0.0, size),
        ],
    );
    Room::build(g, RoomConfig::default()).unwrap()
}

fn catalog() -> HashMap<String, AssetShape> {
    let mut c = HashMap::new();
    c.insert(
        "chair".to_owned(),
        AssetShape::from_render_box(Aabb::from_center_size(
            Point3::new(0.0, 0.9, 0.0),
            Vector3::new(0.6, 1.8, 0.6),
        )),
    );
    c
}

fn down_at(x: f64, z: f64) -> Ray {
    Ray::new(Point3::new(x, 3.0, z), Vector3::new(0.0, -1.0, 0.0)).unwrap()
}

#[test]
fn pointer_outside_room_lands_on_nearest_edge() {
    let room = square_room(4.0);
    let mut gesture = PlacementGesture::begin(&room);
    let hit = gesture.target(&room, &down_at(6.0, 1.5)).unwrap();
    let clamped = room.space().clamp_to_inside(&hit);
    assert_relative_eq!(clamped, Point3::new(4.0, 0.05, 1.5), epsilon = 1e-12);

    let out = gesture
        .resolve(
            &room,
            &PlacementSolver::default(),
            &AssetDescriptor::new("chair", "chair"),
            &catalog(),
        )
        .unwrap();
    assert_eq!(gesture.phase(), GesturePhase::Resolved);
    assert!(room.space().contains_xz(&out.item.position()));
    assert_relative_eq!(out.item.position().z, 1.5, epsilon = 1e-9);

    // Centered on the east wall line, the chair is pushed inward past the
    // inner face at x = 3.95 and reports no remaining overlap.
    assert!(out.penetration.converged);
    assert!(out.warnings.is_empty());
    assert_relative_eq!(out.item.position().x, 3.798, epsilon = 1e-9);
    assert!(out.item.world_bounds().unwrap().max.x < 3.95);
    assert_eq!(
        overlapping_walls(&out.item.pose, &out.item.shape.colliders, room.slabs()),
        0
    );
}

#[test]
fn tall_chair_is_scaled_to_realistic_height() {
    let room = square_room(4.0);
    let out = PlacementSolver::default()
        .place(
            &room,
            &down_at(2.0, 2.0),
            Vector3::z(),
            &AssetDescriptor::new("chair", "silla"),
            &catalog(),
        )
        .unwrap();
    assert_relative_eq!(out.item.scale(), 0.5, epsilon = 1e-12);
    let b = out.item.world_bounds().unwrap();
    assert_relative_eq!(b.size().y, 0.9, epsilon = 1e-9);
    assert_relative_eq!(b.min.y, room.space().floor_elevation(), epsilon = 1e-9);
}

#[test]
fn wall_overlap_is_pushed_out_within_budget() {
    let room = square_room(4.0);
    // Scaled chair is 0.3 m wide; at x = 3.9 it reaches 0.1 m into the
    // east wall, whose inner face is at x = 3.95.
    let out = PlacementSolver::default()
        .place(
            &room,
            &down_at(3.9, 2.0),
            Vector3::z(),
            &AssetDescriptor::new("chair", "chair"),
            &catalog(),
        )
        .unwrap();
    assert!(out.penetration.converged);
    assert_eq!(out.penetration.iterations, 1);
    assert!(out.warnings.is_empty());
    assert_relative_eq!(out.item.position().x, 3.9 - 0.102, epsilon = 1e-9);
    let b = out.item.world_bounds().unwrap();
    assert!(b.max.x < 3.95);
}

#[test]
fn room_bounds_match_rebuilt_polygon() {
    let g = RoomGeometry::from_loop(
        2.5,
        vec![
            Corner::new("A", 0.0, 0.0),
            Corner::new("B", 5.0, 0.0),
            Corner::new("C", 5.0, 3.0),
            Corner::new("D", 2.5, 3.0),
            Corner::new("E", 2.5, 4.5),
            Corner::new("F", 0.0, 4.5),
        ],
    );
    let room = Room::build(g.clone(), RoomConfig::default()).unwrap();
    let rebuilt = FloorPolygon::from_geometry(&g).unwrap().bounds();
    assert_eq!(*room.space().bounds(), rebuilt);
}

#[test]
fn camera_pointer_places_on_floor() {
    let room = square_room(4.0);
    let camera = PinholeCamera {
        position: Point3::new(2.0, 1.6, 0.5),
        yaw: 0.0,
        pitch: -0.5,
        vertical_fov: 60_f64.to_radians(),
        viewport: (800.0, 600.0),
    };
    let out = PlacementSolver::default()
        .place_at_pointer(
            &room,
            &camera,
            Point2::new(400.0, 300.0),
            &AssetDescriptor::new("chair", "chair"),
            &catalog(),
        )
        .unwrap();
    assert!(room.space().contains_xz(&out.item.position()));
    assert!(out.item.position().z > 0.5);
}

#[test]
fn committed_items_persist_as_json() {
    let room = square_room(4.0);
    let solver = PlacementSolver::default();
    let out = solver
        .place(
            &room,
            &down_at(1.0, 1.0),
            Vector3::z(),
            &AssetDescriptor::new("chair", "chair"),
            &catalog(),
        )
        .unwrap();

    let mut furnishings = Furnishings::new(&room);
    let id = furnishings.insert(&room, out.item).unwrap();
    furnishings
        .move_to(id, &room, &Point3::new(3.0, 0.0, 3.0), &solver)
        .unwrap();

    let saved: Vec<&PlacedItem> = furnishings.iter().map(|(_, item)| item).collect();
    let json = serde_json::to_string(&saved).unwrap();
    let loaded: Vec<PlacedItem> = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_relative_eq!(loaded[0].position().x, 3.0, epsilon = 1e-9);
    assert_relative_eq!(loaded[0].scale(), 0.5, epsilon = 1e-12);
}

#[test]
fn surfaces_cover_the_same_outline() {
    let room = square_room(3.0);
    let floor = floor_mesh(&room).unwrap();
    let ceiling = ceiling_mesh(&room).unwrap();
    assert_eq!(floor.indices.len(), 2);
    assert_eq!(ceiling.indices.len(), 2);
    assert_relative_eq!(ceiling.vertices[0].y - floor.vertices[0].y, 2.5, epsilon = 1e-12);
}
