use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::tasks::UiTask;
use crate::FrameCallbackId;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    ui_tasks: RefCell<VecDeque<Rc<UiTask>>>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            ui_tasks: RefCell::new(VecDeque::new()),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
                callbacks.remove(index);
            }
        }
        self.maybe_clear_needs_frame();
    }

    fn maybe_clear_needs_frame(&self) {
        if !self.has_frame_callbacks() && !self.has_ui_tasks() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    // Callbacks registered while draining (an animation loop re-arming
    // itself) land in the queue after the swap and run on the NEXT drain,
    // never inside the current one.
    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::new();
        {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            pending.reserve(callbacks.len());
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push(callback);
                }
            }
        }
        for callback in pending {
            callback(frame_time_nanos);
        }
        self.maybe_clear_needs_frame();
    }

    fn spawn_ui(&self, future: Pin<Box<dyn Future<Output = ()> + 'static>>) {
        self.ui_tasks
            .borrow_mut()
            .push_back(Rc::new(UiTask::new(future)));
        self.schedule();
    }

    fn drain_ui(&self) {
        let mut tasks: Vec<Rc<UiTask>> = {
            let mut queue = self.ui_tasks.borrow_mut();
            queue.drain(..).collect()
        };
        let mut still_pending = Vec::new();
        for task in tasks.drain(..) {
            if !task.poll() {
                still_pending.push(task);
            }
        }
        self.ui_tasks.borrow_mut().extend(still_pending);
        self.maybe_clear_needs_frame();
    }

    fn has_ui_tasks(&self) -> bool {
        !self.ui_tasks.borrow().is_empty()
    }
}

/// Owning handle to the runtime. Dropping it invalidates every
/// [`RuntimeHandle`], which makes in-flight callbacks silent no-ops.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

/// No-op scheduler for hosts that poll [`Runtime::needs_frame`] directly.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Weak handle passed into animation loops. Every operation upgrades the
/// inner runtime and silently does nothing once the runtime is gone.
#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.schedule();
        }
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.0
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.0.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs every callback registered before this call with the given
    /// frame timestamp. One invocation per display refresh.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.0.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Queues a future on the runtime's cooperative task queue. The
    /// future is polled on every [`RuntimeHandle::drain_ui`] until it
    /// completes; it is dropped if the runtime is already gone.
    pub fn spawn_ui(&self, future: impl Future<Output = ()> + 'static) {
        if let Some(inner) = self.0.upgrade() {
            inner.spawn_ui(Box::pin(future));
        }
    }

    pub fn drain_ui(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.drain_ui();
        }
    }

    pub fn has_ui_tasks(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_ui_tasks())
            .unwrap_or(false)
    }
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;
