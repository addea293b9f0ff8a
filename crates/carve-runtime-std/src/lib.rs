//! Standard runtime services backed by Rust's `std` library.
//!
//! Concrete implementations of the platform traits from `carve-core`:
//! an atomic frame-request scheduler a host loop can poll (or subscribe
//! to through a waker) and a monotonic clock that stamps each frame
//! drain with nanoseconds since startup.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use carve_core::{Clock, FrameClock, PointerTracker, Runtime, RuntimeHandle, RuntimeScheduler};

/// Scheduler that latches frame requests for a polling host loop.
pub struct StdScheduler {
    frame_requested: AtomicBool,
    frame_waker: RwLock<Option<Arc<dyn Fn() + Send + Sync + 'static>>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            frame_waker: RwLock::new(None),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker invoked whenever a new frame is scheduled, for
    /// hosts that block between events instead of polling.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.frame_waker.write().unwrap() = Some(Arc::new(waker));
    }

    pub fn clear_frame_waker(&self) {
        *self.frame_waker.write().unwrap() = None;
    }

    fn wake(&self) {
        let waker = self.frame_waker.read().unwrap().clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Clock implementation backed by [`std::time::Instant`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_nanos() as u64
    }
}

/// Bundles the standard scheduler and clock with a runtime, plus the
/// shared pointer the host feeds from its input events.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: Arc<StdClock>,
    runtime: Runtime,
    pointer: PointerTracker,
    started: Instant,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let clock = Arc::new(StdClock);
        let started = clock.now();
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
            clock,
            pointer: PointerTracker::new(),
            started,
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn pointer(&self) -> PointerTracker {
        self.pointer.clone()
    }

    /// Nanoseconds since this runtime was created; the timestamp every
    /// frame drain is stamped with.
    pub fn frame_time_nanos(&self) -> u64 {
        self.clock.elapsed_nanos(self.started)
    }

    /// Returns whether a frame was requested since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    /// Runs one frame: drains pending frame callbacks at the current
    /// wall-clock timestamp, then the cooperative UI tasks.
    pub fn advance(&self) -> u64 {
        let now = self.frame_time_nanos();
        let handle = self.handle();
        handle.drain_frame_callbacks(now);
        handle.drain_ui();
        now
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("frame_time_nanos", &self.frame_time_nanos())
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::StdRuntime;

    #[test]
    fn registering_a_callback_latches_a_frame_request() {
        let runtime = StdRuntime::new();
        assert!(!runtime.take_frame_request());

        let fired = Rc::new(Cell::new(false));
        let guard = {
            let fired = fired.clone();
            runtime.frame_clock().with_frame_nanos(move |_| {
                fired.set(true);
            })
        };

        assert!(runtime.take_frame_request());
        assert!(!runtime.take_frame_request(), "request is edge triggered");

        runtime.advance();
        drop(guard);
        assert!(fired.get());
    }

    #[test]
    fn advance_stamps_monotonic_timestamps() {
        let runtime = StdRuntime::new();
        let first = runtime.advance();
        let second = runtime.advance();
        assert!(second >= first);
    }

    #[test]
    fn frame_waker_fires_on_schedule() {
        let runtime = StdRuntime::new();
        let wakes = Arc::new(AtomicUsize::new(0));
        {
            let wakes = wakes.clone();
            runtime.scheduler().set_frame_waker(move || {
                wakes.fetch_add(1, Ordering::SeqCst);
            });
        }

        let guard = runtime.frame_clock().with_frame_nanos(|_| {});
        assert_eq!(wakes.load(Ordering::SeqCst), 1);

        runtime.scheduler().clear_frame_waker();
        drop(guard);
        let _guard = runtime.frame_clock().with_frame_nanos(|_| {});
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }
}
