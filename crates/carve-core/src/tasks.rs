//! Cooperative UI task queue.
//!
//! Tasks are plain futures polled on the runtime thread whenever the
//! host drains them, typically right after a frame callback drain. There
//! is no real waker wiring: a task that returns `Pending` simply stays
//! queued and is polled again on the next drain.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_task::noop_waker_ref;

pub(crate) struct UiTask {
    future: RefCell<Option<Pin<Box<dyn Future<Output = ()> + 'static>>>>,
}

impl UiTask {
    pub(crate) fn new(future: Pin<Box<dyn Future<Output = ()> + 'static>>) -> Self {
        Self {
            future: RefCell::new(Some(future)),
        }
    }

    /// Polls the task once. Returns true when the task completed.
    pub(crate) fn poll(&self) -> bool {
        let mut slot = self.future.borrow_mut();
        let Some(future) = slot.as_mut() else {
            return true;
        };
        let mut cx = Context::from_waker(noop_waker_ref());
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(()) => {
                slot.take();
                true
            }
            Poll::Pending => false,
        }
    }
}
