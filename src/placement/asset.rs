use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::math::{Point3, Vector3};

/// Local-space bounding geometry of an asset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetShape {
    /// Bounds of the visible parts.
    #[serde(default)]
    pub render_bounds: Vec<Aabb>,
    /// Solid volumes used for wall penetration.
    #[serde(default)]
    pub colliders: Vec<Aabb>,
}

impl AssetShape {
    /// An asset drawn as a single box and carrying no colliders.
    #[must_use]
    pub fn from_render_box(bounds: Aabb) -> Self {
        Self {
            render_bounds: vec![bounds],
            colliders: Vec::new(),
        }
    }

    /// Union of the render bounds, or of the colliders when nothing is
    /// rendered.
    #[must_use]
    pub fn combined_bounds(&self) -> Option<Aabb> {
        Aabb::union_all(&self.render_bounds).or_else(|| Aabb::union_all(&self.colliders))
    }

    /// Gives the asset a box collider when it has none: the combined render
    /// bounds, or a unit cube at the origin for an empty asset.
    ///
    /// Returns `true` if a collider was added.
    pub fn ensure_collider(&mut self) -> bool {
        if !self.colliders.is_empty() {
            return false;
        }
        let collider = Aabb::union_all(&self.render_bounds)
            .unwrap_or_else(|| Aabb::from_center_size(Point3::origin(), Vector3::repeat(1.0)));
        self.colliders.push(collider);
        true
    }
}

/// Describes what the user asked to place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Key into an [`AssetCatalog`].
    pub id: String,
    /// Free-form category or display name used for the height table.
    pub category: String,
}

impl AssetDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
        }
    }
}

/// Source of asset bounding geometry.
pub trait AssetCatalog {
    /// Shape of the asset `asset_id`, if known.
    fn shape(&self, asset_id: &str) -> Option<AssetShape>;
}

impl AssetCatalog for HashMap<String, AssetShape> {
    fn shape(&self, asset_id: &str) -> Option<AssetShape> {
        self.get(asset_id).cloned()
    }
}
