use carve_geometry::Vec2;

use crate::lerp::Lerp;

/// Smoothing configuration for a pointer follower: the fraction of the
/// remaining distance to the target covered on each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FollowSpec {
    pub factor: f64,
}

impl FollowSpec {
    pub const fn new(factor: f64) -> Self {
        Self { factor }
    }

    pub fn step(&self, current: Vec2, target: Vec2) -> Vec2 {
        step(current, target, self.factor)
    }
}

impl Default for FollowSpec {
    fn default() -> Self {
        Self { factor: 0.2 }
    }
}

/// One smoothing step toward `target`.
///
/// Applied once per frame this converges geometrically while the target
/// is stationary and never overshoots. The factor is clamped so the
/// function is total: anything at or below zero holds position, anything
/// at or above one snaps to the target bit-exactly rather than trusting
/// the interpolation to round there.
pub fn step(current: Vec2, target: Vec2, factor: f64) -> Vec2 {
    if factor >= 1.0 {
        target
    } else if factor <= 0.0 {
        current
    } else {
        current.lerp(&target, factor)
    }
}

/// Scalar variant of [`step`], used for scale tracks and reveal offsets.
pub fn step_scalar(current: f64, target: f64, factor: f64) -> f64 {
    if factor >= 1.0 {
        target
    } else if factor <= 0.0 {
        current
    } else {
        current.lerp(&target, factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_stays_on_the_segment() {
        let current = Vec2::new(-3.0, 7.0);
        let target = Vec2::new(11.0, -5.0);
        for i in 1..=10 {
            let factor = i as f64 / 10.0;
            let next = step(current, target, factor);
            let total = target - current;
            let moved = next - current;
            // No overshoot: the step never covers more than the full gap.
            assert!(moved.length() <= total.length() + 1e-12);
            // And never moves backwards.
            assert!(moved.dot(total) >= 0.0);
        }
    }

    #[test]
    fn factor_one_snaps_exactly() {
        let current = Vec2::new(0.1, 0.2);
        let target = Vec2::new(0.3, 0.7);
        assert_eq!(step(current, target, 1.0), target);
    }

    #[test]
    fn factor_zero_or_below_holds_position() {
        let current = Vec2::new(5.0, 5.0);
        let target = Vec2::new(50.0, 50.0);
        assert_eq!(step(current, target, 0.0), current);
        assert_eq!(step(current, target, -2.0), current);
    }

    #[test]
    fn repeated_half_steps_converge_geometrically() {
        let mut position = 0.0;
        for _ in 0..50 {
            position = step_scalar(position, 100.0, 0.5);
        }
        assert!((position - 100.0).abs() < 1e-9);
    }

    #[test]
    fn quarter_steps_match_expected_trajectory() {
        let mut position = Vec2::ZERO;
        let target = Vec2::new(100.0, 100.0);
        position = step(position, target, 0.25);
        assert_eq!(position, Vec2::new(25.0, 25.0));
        position = step(position, target, 0.25);
        assert_eq!(position, Vec2::new(43.75, 43.75));
    }
}
