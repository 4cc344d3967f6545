use serde::{Deserialize, Serialize};

/// Where a newly placed item takes its facing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YawPolicy {
    /// Face the room's canonical forward direction.
    #[default]
    RoomForward,
    /// Face the way the viewer is looking.
    Viewer,
}

fn default_true() -> bool {
    true
}

fn default_min_height() -> f64 {
    0.25
}

fn default_max_height() -> f64 {
    2.2
}

fn default_max_footprint_fraction() -> f64 {
    0.45
}

fn default_scale_range() -> [f64; 2] {
    [0.02, 50.0]
}

fn default_max_penetration_iterations() -> usize {
    5
}

fn default_penetration_margin() -> f64 {
    0.002
}

fn default_move_snap() -> f64 {
    0.05
}

/// Grid step used when snapping is switched on without an explicit step.
pub const DEFAULT_GRID_SNAP: f64 = 0.25;

/// Placement solver options.
///
/// Every field has a default so a host can load a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Pull the target point into the room before anything else.
    #[serde(default = "default_true")]
    pub clamp_to_room: bool,

    /// Horizontal grid step for new placements; `None` disables snapping.
    #[serde(default)]
    pub grid_snap: Option<f64>,

    /// Horizontal grid step for moves of committed items; 0 disables it.
    #[serde(default = "default_move_snap")]
    pub move_snap: f64,

    #[serde(default)]
    pub yaw_policy: YawPolicy,

    /// Angular step in degrees; values at or below 0.01 disable snapping.
    #[serde(default)]
    pub yaw_snap_degrees: f64,

    /// Extra yaw in degrees applied after snapping.
    #[serde(default)]
    pub yaw_offset_degrees: f64,

    /// Scale items to a per-category real-world height.
    #[serde(default = "default_true")]
    pub realistic_scale: bool,

    /// Keep items within the height limits and footprint ceiling.
    #[serde(default = "default_true")]
    pub auto_scale: bool,

    #[serde(default = "default_min_height")]
    pub min_height: f64,

    #[serde(default = "default_max_height")]
    pub max_height: f64,

    /// Largest share of the room's width or depth a footprint may take.
    #[serde(default = "default_max_footprint_fraction")]
    pub max_footprint_fraction: f64,

    /// Bounds on a single realistic-scale multiplier.
    #[serde(default = "default_scale_range")]
    pub scale_range: [f64; 2],

    #[serde(default = "default_max_penetration_iterations")]
    pub max_penetration_iterations: usize,

    /// Distance added to each push out of a wall.
    #[serde(default = "default_penetration_margin")]
    pub penetration_margin: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            clamp_to_room: true,
            grid_snap: None,
            move_snap: default_move_snap(),
            yaw_policy: YawPolicy::default(),
            yaw_snap_degrees: 0.0,
            yaw_offset_degrees: 0.0,
            realistic_scale: true,
            auto_scale: true,
            min_height: default_min_height(),
            max_height: default_max_height(),
            max_footprint_fraction: default_max_footprint_fraction(),
            scale_range: default_scale_range(),
            max_penetration_iterations: default_max_penetration_iterations(),
            penetration_margin: default_penetration_margin(),
        }
    }
}

impl PlacementConfig {
    /// Turns on grid snapping with the standard step.
    #[must_use]
    pub fn with_grid_snap(mut self) -> Self {
        self.grid_snap = Some(DEFAULT_GRID_SNAP);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_matches_default() {
        let cfg: PlacementConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, PlacementConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg: PlacementConfig =
            serde_json::from_str(r#"{ "yaw_policy": "viewer", "grid_snap": 0.5 }"#).unwrap();
        assert_eq!(cfg.yaw_policy, YawPolicy::Viewer);
        assert_eq!(cfg.grid_snap, Some(0.5));
        assert_eq!(cfg.max_penetration_iterations, 5);
        assert!((cfg.max_footprint_fraction - 0.45).abs() < 1e-12);
    }

    #[test]
    fn grid_snap_helper_uses_standard_step() {
        let cfg = PlacementConfig::default().with_grid_snap();
        assert_eq!(cfg.grid_snap, Some(DEFAULT_GRID_SNAP));
    }
}
