//! Frame-driven scene layer for Carve
//!
//! [`MotionScene`] is the single place where ordering matters: it drives
//! every mounted marker from one frame callback, reading the shared
//! pointer sample once per tick so all markers chase the same target.
//! The scroll reveal and glitch ticker run their own small loops on the
//! same frame clock.

pub mod glitch;
pub mod manifest;
pub mod marker;
pub mod scene;
pub mod scroll;

pub use glitch::{GlitchSpec, GlitchTicker};
pub use manifest::{FieldManifest, GlitchManifest, ManifestError, SceneManifest};
pub use marker::{MarkerId, MarkerSpec};
pub use scene::{AnimatorHandle, MotionScene};
pub use scroll::{HeaderReveal, ScrollMetrics, ScrollTracker};
