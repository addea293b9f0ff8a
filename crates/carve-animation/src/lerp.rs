use carve_geometry::Vec2;

/// Trait for values that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f64) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f64) -> Self {
        self + (target - self) * fraction as f32
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f64) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Vec2 {
    fn lerp(&self, target: &Self, fraction: f64) -> Self {
        Vec2::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(0.0f64.lerp(&100.0, 0.0), 0.0);
        assert_eq!(0.0f64.lerp(&100.0, 0.5), 50.0);
        assert_eq!(0.0f64.lerp(&100.0, 1.0), 100.0);
    }

    #[test]
    fn vec2_lerp_is_componentwise() {
        let from = Vec2::new(0.0, 10.0);
        let to = Vec2::new(100.0, -10.0);
        assert_eq!(from.lerp(&to, 0.25), Vec2::new(25.0, 5.0));
    }
}
