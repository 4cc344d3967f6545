//! Loads a captured room, drops a chair where a camera pointer lands, then
//! drags it into a wall and prints what the solver did.
//!
//! ```text
//! cargo run --example place_chair
//! RUST_LOG=roomkit=debug cargo run --example place_chair
//! ```

use std::collections::HashMap;

use roomkit::geometry::{Aabb, PinholeCamera};
use roomkit::math::{Point2, Point3, Vector3};
use roomkit::placement::{AssetDescriptor, AssetShape, PlacementSolver};
use roomkit::room::{Room, RoomConfig, RoomGeometry, ViewerClamp};
use roomkit::scene::Furnishings;
use roomkit::tessellation::floor_mesh;

const ROOM: &str = r#"{
    "room_dimensions": { "height": 2.6, "unit": "meters" },
    "corners": [
        { "id": "A", "position": { "x": 0.0, "y": 0.0 } },
        { "id": "B", "position": { "x": 5.0, "y": 0.0 } },
        { "id": "C", "position": { "x": 5.0, "y": 3.0 } },
        { "id": "D", "position": { "x": 2.5, "y": 3.0 } },
        { "id": "E", "position": { "x": 2.5, "y": 4.5 } },
        { "id": "F", "position": { "x": 0.0, "y": 4.5 } }
    ],
    "walls": [
        { "from": "A", "to": "B", "direction": "east" },
        { "from": "B", "to": "C", "direction": "north" },
        { "from": "C", "to": "D", "direction": "west" },
        { "from": "D", "to": "E", "direction": "north" },
        { "from": "E", "to": "F", "direction": "west" },
        { "from": "F", "to": "A", "direction": "south" }
    ]
}"#;

fn main() -> roomkit::Result<()> {
    // Default: WARN for everything, INFO for roomkit.
    // Override with RUST_LOG env var (e.g. RUST_LOG=roomkit=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("roomkit=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let room = Room::build(RoomGeometry::from_json(ROOM)?, RoomConfig::default())?;
    let mesh = floor_mesh(&room)?;
    println!(
        "room: {} walls, floor mesh {} triangles, spawn at {}",
        room.slabs().len(),
        mesh.indices.len(),
        room.space().spawn_point()
    );

    let mut catalog = HashMap::new();
    catalog.insert(
        "chair-oak".to_owned(),
        AssetShape::from_render_box(Aabb::from_center_size(
            Point3::new(0.0, 0.9, 0.0),
            Vector3::new(0.55, 1.8, 0.6),
        )),
    );

    let camera = PinholeCamera {
        position: ViewerClamp::default().clamp(&room, &Point3::new(1.2, 1.6, 0.5)),
        yaw: 0.3,
        pitch: -0.6,
        vertical_fov: 60_f64.to_radians(),
        viewport: (1280.0, 720.0),
    };

    let solver = PlacementSolver::default();
    let outcome = solver.place_at_pointer(
        &room,
        &camera,
        Point2::new(700.0, 500.0),
        &AssetDescriptor::new("chair-oak", "Silla roble"),
        &catalog,
    )?;
    println!(
        "placed {} at {} yaw {:.1} deg scale {:.3}",
        outcome.item.asset_id,
        outcome.item.position(),
        outcome.item.yaw().to_degrees(),
        outcome.item.scale()
    );

    let mut furnishings = Furnishings::new(&room);
    let id = furnishings.insert(&room, outcome.item)?;
    let report = furnishings.move_to(id, &room, &Point3::new(4.98, 0.0, 1.5), &solver)?;
    println!(
        "dragged into the east wall: pushed {:.3} m in {} iteration(s), now at {}",
        report.moved.norm(),
        report.iterations,
        furnishings.get(id)?.position()
    );

    Ok(())
}
