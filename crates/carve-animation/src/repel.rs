use carve_geometry::Vec2;

/// Proximity repulsion for decals that dodge the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RepelSpec {
    /// Distance beyond which the pointer has no influence.
    pub radius: f64,
    /// Displacement magnitude as the pointer closes in, in viewport px.
    pub strength: f64,
}

impl RepelSpec {
    pub const fn new(radius: f64, strength: f64) -> Self {
        Self { radius, strength }
    }

    pub fn displacement(&self, center: Vec2, pointer: Vec2) -> Vec2 {
        repel(center, pointer, self.radius, self.strength)
    }
}

impl Default for RepelSpec {
    fn default() -> Self {
        Self {
            radius: 120.0,
            strength: 8.0,
        }
    }
}

/// Displacement pushing `center` away from `pointer`.
///
/// Linear falloff: full `strength` right at the pointer, zero at the
/// falloff radius. Degenerate inputs (coincident points, non-positive
/// radius) yield a zero displacement instead of failing; the effect is
/// cosmetic and must never interrupt interaction.
///
/// Holds no state between frames. Callers add the displacement to the
/// marker's resting position every frame, so the push disappears on its
/// own once the pointer leaves the radius.
pub fn repel(center: Vec2, pointer: Vec2, radius: f64, strength: f64) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }
    let d = center - pointer;
    let distance = d.length();
    if distance == 0.0 || distance >= radius {
        return Vec2::ZERO;
    }
    let force = (radius - distance) / radius;
    match d.normalized() {
        Some(direction) => direction * force * strength,
        None => Vec2::ZERO,
    }
}
