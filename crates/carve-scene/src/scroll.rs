use std::cell::{Cell, RefCell};
use std::rc::Rc;

use carve_animation::step_scalar;
use carve_core::{FrameCallbackRegistration, RuntimeHandle};

/// Latest scroll geometry reported by the host: scroll offset, viewport
/// height and total content height, all in viewport px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub viewport: f64,
    pub content: f64,
}

impl ScrollMetrics {
    pub const fn new(offset: f64, viewport: f64, content: f64) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }
}

/// Shared last-write-wins scroll state, the same single-writer pattern
/// as the pointer tracker: scroll and resize events overwrite the whole
/// value, animation code reads it whenever it likes.
#[derive(Clone, Default)]
pub struct ScrollTracker {
    metrics: Rc<Cell<ScrollMetrics>>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, metrics: ScrollMetrics) {
        self.metrics.set(metrics);
    }

    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }

    /// How far the page is scrolled, clamped to [0, 1]. Zero whenever
    /// the content fits inside the viewport.
    pub fn progress(&self) -> f64 {
        let m = self.metrics.get();
        if m.content > m.viewport {
            (m.offset / (m.content - m.viewport)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

const SETTLE_EPSILON: f64 = 0.05;

/// Sticky-header reveal: a vertical offset eased between 0 (shown) and
/// `-hidden_depth` (parked above the viewport) by the smoothing stepper.
///
/// Runs its own small frame loop: retargeting cancels any pending frame
/// first, and the loop stops by itself once the offset settles. The
/// callback holds the inner state weakly, so dropping the reveal while
/// mid-animation silently ends the loop.
pub struct HeaderReveal {
    inner: Rc<RefCell<RevealInner>>,
}

struct RevealInner {
    runtime: RuntimeHandle,
    current: f64,
    target: f64,
    factor: f64,
    hidden_depth: f64,
    shown: bool,
    registration: Option<FrameCallbackRegistration>,
}

impl HeaderReveal {
    /// Starts hidden, parked `hidden_depth` px above the viewport.
    pub fn new(runtime: RuntimeHandle, hidden_depth: f64, factor: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RevealInner {
                runtime,
                current: -hidden_depth,
                target: -hidden_depth,
                factor,
                hidden_depth,
                shown: false,
                registration: None,
            })),
        }
    }

    pub fn set_shown(&self, shown: bool) {
        let should_schedule = {
            let mut inner = self.inner.borrow_mut();
            inner.shown = shown;
            let target = if shown { 0.0 } else { -inner.hidden_depth };
            if target == inner.target {
                false
            } else {
                if let Some(registration) = inner.registration.take() {
                    registration.cancel();
                }
                inner.target = target;
                inner.current != inner.target
            }
        };
        if should_schedule {
            RevealInner::schedule_frame(&self.inner);
        }
    }

    /// Shows the header once the page has scrolled past `threshold` px.
    pub fn sync(&self, metrics: ScrollMetrics, threshold: f64) {
        self.set_shown(metrics.offset > threshold);
    }

    pub fn offset(&self) -> f64 {
        self.inner.borrow().current
    }

    pub fn is_shown(&self) -> bool {
        self.inner.borrow().shown
    }

    pub fn is_settled(&self) -> bool {
        let inner = self.inner.borrow();
        inner.current == inner.target
    }
}

impl RevealInner {
    fn schedule_frame(this: &Rc<RefCell<Self>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |_| {
            if let Some(strong) = weak.upgrade() {
                RevealInner::on_frame(&strong);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<Self>>) {
        let schedule_next = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            inner.current = step_scalar(inner.current, inner.target, inner.factor);
            if (inner.current - inner.target).abs() < SETTLE_EPSILON {
                inner.current = inner.target;
                false
            } else {
                true
            }
        };
        if schedule_next {
            Self::schedule_frame(this);
        }
    }
}
