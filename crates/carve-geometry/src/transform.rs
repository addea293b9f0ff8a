use crate::Vec2;

/// The per-frame output written for each animated marker: a translation
/// plus the optional scale/rotation used by hover and drift effects.
///
/// Rotation is in degrees, matching how decorative sweeps are authored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform2D {
    pub translation: Vec2,
    pub rotation: f64,
    pub scale: f64,
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
    };

    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_default() {
        assert_eq!(Transform2D::default(), Transform2D::IDENTITY);
        assert_eq!(Transform2D::IDENTITY.scale, 1.0);
    }

    #[test]
    fn from_translation_keeps_identity_scale() {
        let t = Transform2D::from_translation(Vec2::new(5.0, 6.0));
        assert_eq!(t.translation, Vec2::new(5.0, 6.0));
        assert_eq!(t.rotation, 0.0);
        assert_eq!(t.scale, 1.0);
    }
}
