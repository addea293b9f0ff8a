//! Animation primitives for Carve
//!
//! Pure, frame-rate independent building blocks: linear interpolation,
//! easing curves, the smoothing stepper that drives pointer followers,
//! proximity repulsion for decals that dodge the cursor, looping drift
//! tracks for ambient motion, and a small velocity particle field.
//!
//! Nothing in this crate owns a clock or a callback; every function is
//! re-evaluated from live state each frame by the scene layer, which is
//! what keeps variable frame intervals from accumulating drift.

pub mod drift;
pub mod easing;
pub mod field;
pub mod follow;
pub mod lerp;
pub mod repel;

pub use drift::{DriftOffset, DriftSpec};
pub use easing::Easing;
pub use field::{Field, FieldSpec, Particle};
pub use follow::{step, step_scalar, FollowSpec};
pub use lerp::Lerp;
pub use repel::{repel, RepelSpec};

pub mod prelude {
    pub use crate::drift::{DriftOffset, DriftSpec};
    pub use crate::easing::Easing;
    pub use crate::field::{Field, FieldSpec, Particle};
    pub use crate::follow::{step, step_scalar, FollowSpec};
    pub use crate::lerp::Lerp;
    pub use crate::repel::{repel, RepelSpec};
}
