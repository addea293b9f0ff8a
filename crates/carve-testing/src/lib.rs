//! Testing utilities and harness for Carve
//!
//! A deterministic stand-in for the host display loop: the test clock
//! only moves when a test says so, and every "frame" is an explicit
//! drain of the runtime's callbacks followed by the UI task queue.

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use carve_core::{FrameClock, PointerTracker, Runtime, RuntimeHandle, RuntimeScheduler};

/// Scheduler that records how many frames were requested instead of
/// waking anything.
#[derive(Default)]
pub struct TestScheduler {
    requests: AtomicUsize,
}

impl TestScheduler {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for TestScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Runtime plus a manually advanced frame clock.
pub struct TestRuntime {
    runtime: Runtime,
    scheduler: Arc<TestScheduler>,
    pointer: PointerTracker,
    now_nanos: Cell<u64>,
    frame_interval_nanos: Cell<u64>,
}

impl TestRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(TestScheduler::default());
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
            pointer: PointerTracker::new(),
            now_nanos: Cell::new(0),
            frame_interval_nanos: Cell::new(16_666_667),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn scheduler(&self) -> Arc<TestScheduler> {
        self.scheduler.clone()
    }

    /// The shared pointer most scene tests script against.
    pub fn pointer(&self) -> PointerTracker {
        self.pointer.clone()
    }

    pub fn needs_frame(&self) -> bool {
        self.runtime.needs_frame()
    }

    pub fn now_nanos(&self) -> u64 {
        self.now_nanos.get()
    }

    pub fn set_frame_interval_nanos(&self, nanos: u64) {
        self.frame_interval_nanos.set(nanos);
    }

    /// Advances the clock by one frame interval and drains the runtime,
    /// returning the new frame timestamp.
    pub fn advance_frame(&self) -> u64 {
        let now = self.now_nanos.get() + self.frame_interval_nanos.get();
        self.now_nanos.set(now);
        let handle = self.runtime.handle();
        handle.drain_frame_callbacks(now);
        handle.drain_ui();
        now
    }

    pub fn advance_frames(&self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }
}

impl Default for TestRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn advance_frame_moves_the_clock_and_drains() {
        let test = TestRuntime::new();
        test.set_frame_interval_nanos(1_000);
        let times: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));

        let guard = {
            let times = times.clone();
            test.frame_clock().with_frame_nanos(move |time| {
                times.borrow_mut().push(time);
            })
        };
        assert_eq!(test.scheduler().requests(), 1);

        test.advance_frame();
        drop(guard);
        assert_eq!(times.borrow().as_slice(), [1_000]);
        assert!(!test.needs_frame());
    }

    #[test]
    fn pointer_is_shared_with_clones() {
        let test = TestRuntime::new();
        let writer = test.pointer();
        writer.record(3.0, 4.0);
        assert_eq!(test.pointer().sample().x, 3.0);
    }
}
