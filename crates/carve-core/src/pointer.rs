use std::cell::Cell;
use std::rc::Rc;

/// Most recent known pointer location, in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shared last-write-wins pointer state.
///
/// One input handler calls [`record`](PointerTracker::record) per native
/// pointer-move event; any number of animation loops read the sample each
/// frame through their own clone. The sample is replaced wholesale inside
/// a single-threaded `Cell`, so there is deliberately no lock here: a
/// reader can at worst observe the previous event's coordinates, and that
/// staleness is part of the contract. Do not add synchronization when
/// porting this type to a multi-threaded host; route all access through
/// the runtime thread instead.
#[derive(Clone, Default)]
pub struct PointerTracker {
    sample: Rc<Cell<PointerSample>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the tracker at a known position, e.g. the viewport center,
    /// so followers do not lurch in from (0, 0) before the first event.
    pub fn starting_at(x: f64, y: f64) -> Self {
        let tracker = Self::new();
        tracker.record(x, y);
        tracker
    }

    /// The sole mutator; coordinates pass through unvalidated.
    pub fn record(&self, x: f64, y: f64) {
        self.sample.set(PointerSample::new(x, y));
    }

    pub fn sample(&self) -> PointerSample {
        self.sample.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_sample() {
        let tracker = PointerTracker::new();
        let reader = tracker.clone();
        tracker.record(12.0, 34.0);
        assert_eq!(reader.sample(), PointerSample::new(12.0, 34.0));
    }

    #[test]
    fn last_write_wins() {
        let tracker = PointerTracker::starting_at(640.0, 360.0);
        tracker.record(1.0, 1.0);
        tracker.record(2.0, 2.0);
        assert_eq!(tracker.sample(), PointerSample::new(2.0, 2.0));
    }
}
