//! Uniform scale passes applied to a new placement.

use crate::geometry::{Aabb, Pose};
use crate::room::Bounds;

/// Heights below this are treated as flat and never rescaled.
const MIN_MEASURABLE: f64 = 1e-4;

/// Multipliers closer to 1 than this are skipped.
const SCALE_DEADBAND: f64 = 1e-3;

fn apply(pose: &mut Pose, factor: f64) -> f64 {
    if (factor - 1.0).abs() > SCALE_DEADBAND {
        pose.scale *= factor;
        factor
    } else {
        1.0
    }
}

/// Scales `pose` uniformly so `local` stands `target` meters tall.
///
/// The multiplier is clamped into `range`, taken in either order. Returns
/// the applied factor.
pub fn scale_to_height(pose: &mut Pose, local: &Aabb, target: f64, range: [f64; 2]) -> f64 {
    let height = local.size().y * pose.scale;
    if height < MIN_MEASURABLE {
        return 1.0;
    }
    let lo = range[0].min(range[1]);
    let hi = range[0].max(range[1]);
    apply(pose, (target / height).max(lo).min(hi))
}

/// Keeps `local` within `[min_height, max_height]`, then shrinks it until its
/// world footprint fits inside `fraction` of the room's width and depth.
///
/// Never scales up for the footprint. Returns the combined factor.
pub fn fit_to_room(
    pose: &mut Pose,
    local: &Aabb,
    room: &Bounds,
    min_height: f64,
    max_height: f64,
    fraction: f64,
) -> f64 {
    let mut total = 1.0;

    let height = local.size().y * pose.scale;
    if height > MIN_MEASURABLE {
        let s = if height < min_height {
            min_height / height
        } else if height > max_height {
            max_height / height
        } else {
            1.0
        };
        total *= apply(pose, s);
    }

    let footprint = local.transformed(pose).size();
    let ratio = |limit: f64, size: f64| {
        if size <= MIN_MEASURABLE {
            1.0
        } else {
            limit / size
        }
    };
    // NaN limits from unbounded rooms drop out of `min`.
    let s = 1.0_f64
        .min(ratio(room.width() * fraction, footprint.x))
        .min(ratio(room.depth() * fraction, footprint.z));
    if s < 0.999 {
        pose.scale *= s;
        total *= s;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use approx::assert_relative_eq;

    fn standing(w: f64, h: f64, d: f64) -> Aabb {
        Aabb::from_center_size(Point3::new(0.0, h * 0.5, 0.0), Vector3::new(w, h, d))
    }

    fn room(w: f64, d: f64) -> Bounds {
        Bounds::new(0.0, w, 0.0, d)
    }

    #[test]
    fn tall_chair_shrinks_to_table_height() {
        let mut pose = Pose::default();
        let f = scale_to_height(&mut pose, &standing(0.5, 1.8, 0.5), 0.9, [0.02, 50.0]);
        assert_relative_eq!(f, 0.5, epsilon = 1e-12);
        assert_relative_eq!(1.8 * pose.scale, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn multiplier_is_clamped() {
        let mut pose = Pose::default();
        scale_to_height(&mut pose, &standing(0.001, 0.001, 0.001), 1.0, [0.02, 50.0]);
        assert_relative_eq!(pose.scale, 50.0);
    }

    #[test]
    fn inverted_scale_range_is_normalized() {
        let mut pose = Pose::default();
        scale_to_height(&mut pose, &standing(0.001, 0.001, 0.001), 1.0, [50.0, 0.02]);
        assert_relative_eq!(pose.scale, 50.0);

        let mut pose = Pose::default();
        let f = scale_to_height(&mut pose, &standing(0.5, 1.8, 0.5), 0.9, [50.0, 0.02]);
        assert_relative_eq!(f, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn flat_asset_is_left_alone() {
        let mut pose = Pose::default();
        let f = scale_to_height(&mut pose, &standing(1.0, 0.0, 1.0), 0.9, [0.02, 50.0]);
        assert_relative_eq!(f, 1.0);
        assert_relative_eq!(pose.scale, 1.0);
    }

    #[test]
    fn near_unit_factor_is_skipped() {
        let mut pose = Pose::default();
        scale_to_height(&mut pose, &standing(1.0, 0.9005, 1.0), 0.9, [0.02, 50.0]);
        assert_relative_eq!(pose.scale, 1.0);
    }

    #[test]
    fn short_item_grows_to_min_height() {
        let mut pose = Pose::default();
        fit_to_room(&mut pose, &standing(0.1, 0.1, 0.1), &room(4.0, 4.0), 0.25, 2.2, 0.45);
        assert_relative_eq!(pose.scale, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn wide_item_shrinks_to_footprint_ceiling() {
        let mut pose = Pose::default();
        fit_to_room(&mut pose, &standing(3.0, 0.8, 1.0), &room(4.0, 4.0), 0.25, 2.2, 0.45);
        assert_relative_eq!(3.0 * pose.scale, 1.8, epsilon = 1e-12);
    }

    #[test]
    fn footprint_never_scales_up() {
        let mut pose = Pose::default();
        let f = fit_to_room(&mut pose, &standing(0.5, 1.0, 0.5), &room(4.0, 4.0), 0.25, 2.2, 0.45);
        assert_relative_eq!(f, 1.0);
    }

    #[test]
    fn unbounded_room_skips_footprint() {
        let mut pose = Pose::default();
        let nan = Bounds::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        fit_to_room(&mut pose, &standing(30.0, 1.0, 30.0), &nan, 0.25, 2.2, 0.45);
        assert_relative_eq!(pose.scale, 1.0);
    }
}
