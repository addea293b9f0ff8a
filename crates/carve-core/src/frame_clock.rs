use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Hands out one-shot frame callbacks aligned to the host's refresh.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Registers `callback` to run once on the next frame drain, with the
    /// frame timestamp in nanoseconds. The returned registration cancels
    /// on drop; keep it alive for as long as the callback should fire.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut callback_opt = Some(callback);
        let runtime = self.runtime.clone();
        match runtime.register_frame_callback(move |time| {
            if let Some(callback) = callback_opt.take() {
                callback(time);
            }
        }) {
            Some(id) => FrameCallbackRegistration::new(runtime, id),
            None => FrameCallbackRegistration::inactive(runtime),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            callback(nanos / 1_000_000);
        })
    }

    /// Future resolving to the next frame's timestamp. Intended for tasks
    /// spawned with [`RuntimeHandle::spawn_ui`]; the host must drain UI
    /// tasks after draining frame callbacks for the wakeup to be seen.
    pub fn next_frame(&self) -> NextFrame {
        NextFrame {
            clock: self.clone(),
            frame_time: Rc::new(Cell::new(None)),
            registration: None,
        }
    }
}

/// Registration for a pending frame callback.
///
/// Cancelling is idempotent: the first call (or the drop) removes the
/// callback, later calls find nothing to remove. Cancelling after the
/// callback already ran is equally a no-op.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn cancel(mut self) {
        self.cancel_in_place();
    }

    fn cancel_in_place(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.cancel_in_place();
    }
}

/// Future returned by [`FrameClock::next_frame`].
pub struct NextFrame {
    clock: FrameClock,
    frame_time: Rc<Cell<Option<u64>>>,
    registration: Option<FrameCallbackRegistration>,
}

impl Future for NextFrame {
    type Output = u64;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if let Some(time) = this.frame_time.get() {
            return Poll::Ready(time);
        }
        if this.registration.is_none() {
            let slot = this.frame_time.clone();
            this.registration = Some(this.clock.with_frame_nanos(move |time| {
                slot.set(Some(time));
            }));
        }
        Poll::Pending
    }
}
