use carve_animation::{DriftSpec, FollowSpec, RepelSpec};
use carve_geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Identifies one mounted marker within its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub(crate) u64);

/// Declarative description of one animated marker.
///
/// A marker either follows the pointer (`follow`) or rests at its
/// `anchor`; on top of that base position it can drift through looping
/// keyframes, dodge the pointer (`repel`), and scale on hover/press.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSpec {
    /// Resting position in viewport coordinates.
    pub anchor: Vec2,
    pub follow: Option<FollowSpec>,
    pub repel: Option<RepelSpec>,
    pub drift: Option<DriftSpec>,
    /// Scale multiplier while the marker is hovered.
    pub hover_scale: f64,
    /// Scale multiplier while the marker is pressed; wins over hover.
    pub press_scale: f64,
    /// Smoothing factor for the hover/press scale track.
    pub scale_factor: f64,
}

impl Default for MarkerSpec {
    fn default() -> Self {
        Self {
            anchor: Vec2::ZERO,
            follow: None,
            repel: None,
            drift: None,
            hover_scale: 1.0,
            press_scale: 1.0,
            scale_factor: 0.2,
        }
    }
}

impl MarkerSpec {
    pub fn at(anchor: Vec2) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }

    pub fn following(mut self, factor: f64) -> Self {
        self.follow = Some(FollowSpec::new(factor));
        self
    }

    pub fn repelled(mut self, radius: f64, strength: f64) -> Self {
        self.repel = Some(RepelSpec::new(radius, strength));
        self
    }

    pub fn drifting(mut self, drift: DriftSpec) -> Self {
        self.drift = Some(drift);
        self
    }

    pub fn with_hover_scale(mut self, scale: f64) -> Self {
        self.hover_scale = scale;
        self
    }

    pub fn with_press_scale(mut self, scale: f64) -> Self {
        self.press_scale = scale;
        self
    }
}
