//! Real-world height table keyed by asset category.

/// Furniture kinds with a known real-world height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Chair,
    DeskLamp,
    FloorLamp,
    Table,
    Sofa,
    Monitor,
    Keyboard,
    Mouse,
    Computer,
    Laptop,
    Furniture,
}

/// Matching order matters: the first rule whose keyword appears wins.
const RULES: &[(&[&str], Category)] = &[
    (&["silla", "chair"], Category::Chair),
    (&["lamp", "lampara", "lámpara"], Category::FloorLamp),
    (&["mesa", "table", "desk"], Category::Table),
    (&["sofa", "sofá", "couch"], Category::Sofa),
    (&["monitor", "screen"], Category::Monitor),
    (&["keyboard", "teclado"], Category::Keyboard),
    (&["mouse"], Category::Mouse),
    (&["laptop"], Category::Laptop),
    (&["pc", "computer"], Category::Computer),
    (&["furniture"], Category::Furniture),
];

impl Category {
    /// Classifies a free-form asset name by case-insensitive substring.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        let n = name.to_lowercase();
        let found = RULES
            .iter()
            .find(|(keys, _)| keys.iter().any(|k| n.contains(k)))
            .map(|&(_, c)| c)?;
        if found == Self::FloorLamp && n.contains("desk") {
            return Some(Self::DeskLamp);
        }
        Some(found)
    }

    /// Typical height in meters.
    #[must_use]
    pub fn height(self) -> f64 {
        match self {
            Self::Chair => 0.9,
            Self::DeskLamp => 0.5,
            Self::FloorLamp => 1.6,
            Self::Table => 0.75,
            Self::Sofa => 0.85,
            Self::Monitor | Self::Computer => 0.45,
            Self::Keyboard | Self::Mouse => 0.04,
            Self::Laptop => 0.025,
            Self::Furniture => 0.8,
        }
    }
}

/// Target height for an asset name, falling back to a share of
/// `max_height` kept within `[0.4, 1.2]` for unknown categories.
#[must_use]
pub fn target_height(name: &str, max_height: f64) -> f64 {
    Category::classify(name).map_or_else(|| (max_height * 0.6).clamp(0.4, 1.2), Category::height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories() {
        assert_eq!(Category::classify("Office_Chair_02"), Some(Category::Chair));
        assert_eq!(Category::classify("MESA comedor"), Some(Category::Table));
        assert_eq!(Category::classify("Sofá"), Some(Category::Sofa));
        assert_eq!(Category::classify("teclado"), Some(Category::Keyboard));
        assert_eq!(Category::classify("Gaming Laptop"), Some(Category::Laptop));
    }

    #[test]
    fn desk_lamp_is_shorter_than_floor_lamp() {
        assert_eq!(Category::classify("desk lamp"), Some(Category::DeskLamp));
        assert_eq!(Category::classify("Lámpara de pie"), Some(Category::FloorLamp));
        assert!((target_height("desk lamp", 2.2) - 0.5).abs() < 1e-12);
        assert!((target_height("standing lamp", 2.2) - 1.6).abs() < 1e-12);
    }

    #[test]
    fn unknown_category_uses_clamped_fraction() {
        assert!((target_height("plant", 2.2) - 1.2).abs() < 1e-12);
        assert!((target_height("plant", 1.0) - 0.6).abs() < 1e-12);
        assert!((target_height("plant", 0.5) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn chair_target() {
        assert!((target_height("chair", 2.2) - 0.9).abs() < 1e-12);
    }
}
