//! Cooperative frame-scheduling runtime for Carve
//!
//! Everything here is single threaded: animation loops, pointer updates
//! and frame callbacks all run on the thread that drives the runtime.
//! Hosts integrate through the [`RuntimeScheduler`] and [`Clock`] traits
//! and by draining frame callbacks once per display refresh.

pub mod frame_clock;
pub mod platform;
pub mod pointer;
pub mod runtime;
mod tasks;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, NextFrame};
pub use platform::{Clock, RuntimeScheduler};
pub use pointer::{PointerSample, PointerTracker};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

/// Identifier handed out for every registered frame callback.
pub type FrameCallbackId = u64;
