use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use carve_animation::{step_scalar, DriftOffset};
use carve_core::{FrameCallbackRegistration, PointerTracker, RuntimeHandle};
use carve_geometry::{Transform2D, Vec2};
use indexmap::IndexMap;

use crate::marker::{MarkerId, MarkerSpec};

/// Animates every mounted marker from a single frame callback.
///
/// One tick reads the shared pointer sample exactly once and steps all
/// markers against that same sample, so markers chasing a moving target
/// never jitter apart within a frame. The scene re-arms its callback
/// only while markers are mounted and holds it through a `Weak`, which
/// makes a tick against a dropped scene a silent no-op.
pub struct MotionScene {
    inner: Rc<RefCell<SceneInner>>,
}

struct SceneInner {
    runtime: RuntimeHandle,
    pointer: PointerTracker,
    markers: IndexMap<MarkerId, MarkerEntry>,
    next_id: u64,
    registration: Option<FrameCallbackRegistration>,
}

struct MarkerEntry {
    spec: MarkerSpec,
    /// Smoothed base position; written only by the scene's own tick.
    position: Vec2,
    scale: f64,
    hovered: bool,
    pressed: bool,
    mounted_at_nanos: Option<u64>,
    transform: Transform2D,
}

impl MarkerEntry {
    fn new(spec: MarkerSpec) -> Self {
        Self {
            position: spec.anchor,
            scale: 1.0,
            hovered: false,
            pressed: false,
            mounted_at_nanos: None,
            transform: Transform2D::from_translation(spec.anchor),
            spec,
        }
    }

    fn advance(&mut self, pointer: Vec2, frame_time_nanos: u64) {
        let mounted_at = *self.mounted_at_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(mounted_at);

        let follow = self.spec.follow;
        let base = match follow {
            Some(follow) => {
                self.position = follow.step(self.position, pointer);
                self.position
            }
            None => self.spec.anchor,
        };

        let drift = self
            .spec
            .drift
            .as_ref()
            .map(|drift| drift.sample(elapsed))
            .unwrap_or(DriftOffset::REST);
        let center = base + drift.offset;

        let push = self
            .spec
            .repel
            .map(|repel| repel.displacement(center, pointer))
            .unwrap_or(Vec2::ZERO);

        let scale_target = if self.pressed {
            self.spec.press_scale
        } else if self.hovered {
            self.spec.hover_scale
        } else {
            1.0
        };
        self.scale = step_scalar(self.scale, scale_target, self.spec.scale_factor);

        self.transform = Transform2D {
            translation: center + push,
            rotation: drift.rotation,
            scale: self.scale * drift.scale,
        };
    }
}

impl MotionScene {
    pub fn new(runtime: RuntimeHandle, pointer: PointerTracker) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SceneInner {
                runtime,
                pointer,
                markers: IndexMap::new(),
                next_id: 1,
                registration: None,
            })),
        }
    }

    /// Mounts a marker and starts animating it on the next frame.
    ///
    /// The returned handle is the only way to unmount the marker; drop
    /// it (or call [`AnimatorHandle::cancel`]) when the element leaves
    /// the page.
    pub fn mount(&self, spec: MarkerSpec) -> AnimatorHandle {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = MarkerId(inner.next_id);
            inner.next_id += 1;
            inner.markers.insert(id, MarkerEntry::new(spec));
            log::debug!("marker {} mounted ({} active)", id.0, inner.markers.len());
            id
        };
        SceneInner::schedule_frame(&self.inner);
        AnimatorHandle {
            scene: Rc::downgrade(&self.inner),
            id,
            cancelled: Cell::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().markers.is_empty()
    }

    /// True while the scene has a frame callback armed.
    pub fn is_animating(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    pub fn transform(&self, id: MarkerId) -> Option<Transform2D> {
        self.inner
            .borrow()
            .markers
            .get(&id)
            .map(|entry| entry.transform)
    }

    /// Snapshot of every marker's transform, in mount order.
    pub fn transforms(&self) -> Vec<(MarkerId, Transform2D)> {
        self.inner
            .borrow()
            .markers
            .iter()
            .map(|(id, entry)| (*id, entry.transform))
            .collect()
    }

    pub fn set_hovered(&self, id: MarkerId, hovered: bool) {
        if let Some(entry) = self.inner.borrow_mut().markers.get_mut(&id) {
            entry.hovered = hovered;
        }
    }

    pub fn set_pressed(&self, id: MarkerId, pressed: bool) {
        if let Some(entry) = self.inner.borrow_mut().markers.get_mut(&id) {
            entry.pressed = pressed;
        }
    }
}

impl SceneInner {
    fn schedule_frame(this: &Rc<RefCell<Self>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() || inner.markers.is_empty() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                SceneInner::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<Self>>, frame_time_nanos: u64) {
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            // One pointer read per tick, shared by every marker below.
            let sample = inner.pointer.sample();
            let pointer = Vec2::new(sample.x, sample.y);

            for entry in inner.markers.values_mut() {
                entry.advance(pointer, frame_time_nanos);
            }
        }
        Self::schedule_frame(this);
    }
}

/// Cancelable registration for one mounted marker.
///
/// Cancelling unmounts the marker synchronously and is idempotent: the
/// second and every later call, as well as a call after the scene itself
/// is gone, does nothing. Dropping the handle cancels too, so a marker
/// can never keep consuming frames once its owner has let go of it.
pub struct AnimatorHandle {
    scene: Weak<RefCell<SceneInner>>,
    id: MarkerId,
    cancelled: Cell<bool>,
}

impl AnimatorHandle {
    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        let Some(scene) = self.scene.upgrade() else {
            return;
        };
        let mut inner = scene.borrow_mut();
        if inner.markers.shift_remove(&self.id).is_some() {
            log::debug!(
                "marker {} unmounted ({} active)",
                self.id.0,
                inner.markers.len()
            );
        }
        if inner.markers.is_empty() {
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
        }
    }
}

impl Drop for AnimatorHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
