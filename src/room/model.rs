//! Plain room description data and its JSON import.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

use crate::error::{LoadError, Result};
use crate::math::Point2;

/// Height used when a description carries none.
pub const DEFAULT_ROOM_HEIGHT: f64 = 2.5;

/// Compass label a capture pipeline attaches to each wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalLabel {
    North,
    South,
    East,
    West,
}

impl CardinalLabel {
    /// Label of the dominant axis of travel from `from` to `to`.
    ///
    /// `+x` is east and `+z` is north; ties go to the Z axis.
    #[must_use]
    pub fn from_direction(from: &Point2, to: &Point2) -> Self {
        let d = to - from;
        if d.x.abs() > d.y.abs() {
            if d.x > 0.0 {
                Self::East
            } else {
                Self::West
            }
        } else if d.y > 0.0 {
            Self::North
        } else {
            Self::South
        }
    }
}

impl FromStr for CardinalLabel {
    type Err = LoadError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" | "norte" => Ok(Self::North),
            "s" | "south" | "sur" => Ok(Self::South),
            "e" | "east" | "este" => Ok(Self::East),
            "w" | "o" | "west" | "oeste" => Ok(Self::West),
            _ => Err(LoadError::UnknownCardinal(s.to_owned())),
        }
    }
}

impl fmt::Display for CardinalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::North => "N",
            Self::South => "S",
            Self::East => "E",
            Self::West => "W",
        };
        f.write_str(s)
    }
}

/// A labeled floor point where two walls meet.
#[derive(Debug, Clone, PartialEq)]
pub struct Corner {
    pub id: String,
    /// Position on the floor plane, `(x, z)` in meters.
    pub position: Point2,
}

impl Corner {
    /// Creates a corner at `(x, z)`.
    #[must_use]
    pub fn new(id: impl Into<String>, x: f64, z: f64) -> Self {
        Self {
            id: id.into(),
            position: Point2::new(x, z),
        }
    }
}

/// A directed wall between two corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub from: String,
    pub to: String,
    /// Measured length in meters.
    pub length: f64,
    pub cardinal: CardinalLabel,
}

/// Footprint of an obstacle (door, window, column) in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ObstacleDimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub height: f64,
}

/// Something the capture pipeline found attached to the walls.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Obstacle {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub dimensions: ObstacleDimensions,
    /// Corner ids the obstacle is attached to.
    #[serde(default)]
    pub attached_to: Vec<String>,
}

/// Raw measured room: corners, the wall graph linking them, and a height.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomGeometry {
    pub height_meters: f64,
    pub corners: Vec<Corner>,
    pub walls: Vec<Wall>,
    pub obstacles: Vec<Obstacle>,
}

impl RoomGeometry {
    /// Builds a closed room from corners listed in walking order, adding one
    /// wall from each corner to the next and from the last back to the first.
    #[must_use]
    pub fn from_loop(height_meters: f64, corners: Vec<Corner>) -> Self {
        let n = corners.len();
        let walls = (0..n)
            .map(|i| {
                let a = &corners[i];
                let b = &corners[(i + 1) % n];
                Wall {
                    from: a.id.clone(),
                    to: b.id.clone(),
                    length: (b.position - a.position).norm(),
                    cardinal: CardinalLabel::from_direction(&a.position, &b.position),
                }
            })
            .collect();
        Self {
            height_meters,
            corners,
            walls,
            obstacles: Vec::new(),
        }
    }

    /// Parses a room description exported by the capture pipeline.
    ///
    /// A missing or non-positive height falls back to
    /// [`DEFAULT_ROOM_HEIGHT`]. Corners without an id or with a repeated id
    /// are skipped. Walls without a direction label get one derived from
    /// their corner positions.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Json` for malformed input and
    /// `LoadError::UnknownCardinal` for unrecognized wall labels.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawRoom = serde_json::from_str(json).map_err(LoadError::from)?;
        raw.into_geometry()
    }

    /// Looks up a corner by id.
    #[must_use]
    pub fn corner(&self, id: &str) -> Option<&Corner> {
        self.corners.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Deserialize)]
struct RawRoom {
    #[serde(default)]
    room_dimensions: Option<RawDimensions>,
    #[serde(default)]
    corners: Vec<RawCorner>,
    #[serde(default)]
    walls: Vec<RawWall>,
    #[serde(default)]
    obstacles: Vec<Obstacle>,
}

#[derive(Debug, Deserialize)]
struct RawDimensions {
    #[serde(default)]
    height: f64,
}

#[derive(Debug, Deserialize)]
struct RawCorner {
    #[serde(default)]
    id: String,
    position: RawXY,
}

#[derive(Debug, Deserialize)]
struct RawXY {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct RawWall {
    from: String,
    to: String,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    direction: Option<String>,
}

impl RawRoom {
    fn into_geometry(self) -> Result<RoomGeometry> {
        let height_meters = self
            .room_dimensions
            .map(|d| d.height)
            .filter(|h| *h > 0.0)
            .unwrap_or(DEFAULT_ROOM_HEIGHT);

        let mut corners: Vec<Corner> = Vec::with_capacity(self.corners.len());
        let mut positions: HashMap<String, Point2> = HashMap::new();
        for c in self.corners {
            if c.id.is_empty() || positions.contains_key(&c.id) {
                warn!(id = %c.id, "skipping corner with empty or duplicate id");
                continue;
            }
            let corner = Corner::new(c.id, c.position.x, c.position.y);
            positions.insert(corner.id.clone(), corner.position);
            corners.push(corner);
        }

        let mut walls = Vec::with_capacity(self.walls.len());
        for w in self.walls {
            let ends = positions.get(&w.from).zip(positions.get(&w.to));
            let cardinal = match (w.direction.as_deref(), ends) {
                (Some(label), _) if !label.trim().is_empty() => label.parse()?,
                (_, Some((a, b))) => CardinalLabel::from_direction(a, b),
                _ => CardinalLabel::North,
            };
            let length = w
                .distance
                .or_else(|| ends.map(|(a, b)| (b - a).norm()))
                .unwrap_or(0.0);
            walls.push(Wall {
                from: w.from,
                to: w.to,
                length,
                cardinal,
            });
        }

        Ok(RoomGeometry {
            height_meters,
            corners,
            walls,
            obstacles: self.obstacles,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RoomError;

    const EXPORT: &str = r#"{
        "room_dimensions": { "height": 2.7, "unit": "meters" },
        "corners": [
            { "id": "A", "position": { "x": 0.0, "y": 0.0 } },
            { "id": "B", "position": { "x": 4.0, "y": 0.0 } },
            { "id": "C", "position": { "x": 4.0, "y": 3.0 } },
            { "id": "D", "position": { "x": 0.0, "y": 3.0 } }
        ],
        "walls": [
            { "from": "A", "to": "B", "distance": 4.0, "direction": "east" },
            { "from": "B", "to": "C", "distance": 3.0, "direction": "north" },
            { "from": "C", "to": "D", "distance": 4.0, "direction": "W" },
            { "from": "D", "to": "A", "distance": 3.0 }
        ],
        "obstacles": [
            { "type": "door", "id": "d1",
              "dimensions": { "width": 0.9, "depth": 0.1, "height": 2.0 },
              "attached_to": ["A", "B"] }
        ],
        "origin_reference": "A"
    }"#;

    #[test]
    fn parses_capture_export() {
        let g = RoomGeometry::from_json(EXPORT).unwrap();
        assert!((g.height_meters - 2.7).abs() < 1e-12);
        assert_eq!(g.corners.len(), 4);
        assert_eq!(g.walls.len(), 4);
        assert_eq!(g.walls[0].cardinal, CardinalLabel::East);
        assert_eq!(g.walls[2].cardinal, CardinalLabel::West);
        // Missing label derived from D(0,3) -> A(0,0).
        assert_eq!(g.walls[3].cardinal, CardinalLabel::South);
        assert_eq!(g.obstacles[0].kind, "door");
        assert_eq!(g.obstacles[0].attached_to, vec!["A", "B"]);
    }

    #[test]
    fn missing_height_defaults() {
        let json = r#"{ "corners": [], "walls": [] }"#;
        let g = RoomGeometry::from_json(json).unwrap();
        assert!((g.height_meters - DEFAULT_ROOM_HEIGHT).abs() < 1e-12);
        let json = r#"{ "room_dimensions": { "height": 0.0 }, "corners": [], "walls": [] }"#;
        let g = RoomGeometry::from_json(json).unwrap();
        assert!((g.height_meters - DEFAULT_ROOM_HEIGHT).abs() < 1e-12);
    }

    #[test]
    fn duplicate_corner_ids_keep_first() {
        let json = r#"{
            "corners": [
                { "id": "A", "position": { "x": 1.0, "y": 1.0 } },
                { "id": "A", "position": { "x": 9.0, "y": 9.0 } },
                { "id": "", "position": { "x": 2.0, "y": 2.0 } }
            ],
            "walls": []
        }"#;
        let g = RoomGeometry::from_json(json).unwrap();
        assert_eq!(g.corners.len(), 1);
        assert!((g.corner("A").unwrap().position.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let json = r#"{
            "corners": [],
            "walls": [{ "from": "A", "to": "B", "distance": 1.0, "direction": "up" }]
        }"#;
        let err = RoomGeometry::from_json(json).unwrap_err();
        assert!(matches!(err, RoomError::Load(LoadError::UnknownCardinal(_))));
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = RoomGeometry::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RoomError::Load(LoadError::Json(_))));
    }

    #[test]
    fn from_loop_closes_the_cycle() {
        let g = RoomGeometry::from_loop(
            2.5,
            vec![
                Corner::new("A", 0.0, 0.0),
                Corner::new("B", 2.0, 0.0),
                Corner::new("C", 2.0, 2.0),
            ],
        );
        assert_eq!(g.walls.len(), 3);
        assert_eq!(g.walls[2].from, "C");
        assert_eq!(g.walls[2].to, "A");
        assert!((g.walls[0].length - 2.0).abs() < 1e-12);
        assert_eq!(g.walls[1].cardinal, CardinalLabel::North);
    }

    #[test]
    fn cardinal_labels_parse_long_and_short_forms() {
        assert_eq!("N".parse::<CardinalLabel>().unwrap(), CardinalLabel::North);
        assert_eq!("oeste".parse::<CardinalLabel>().unwrap(), CardinalLabel::West);
        assert_eq!(CardinalLabel::East.to_string(), "E");
    }
}
