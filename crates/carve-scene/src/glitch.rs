use std::cell::RefCell;
use std::rc::Rc;

use carve_core::{FrameCallbackRegistration, RuntimeHandle};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tuning for the headline glitch effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchSpec {
    /// Glyphs substituted into the text while scrambling.
    pub charset: String,
    /// Scramble frames per burst before the text is restored.
    pub steps: u32,
    /// Minimum spacing between scramble frames.
    pub step_millis: u64,
    /// Quiet time between bursts.
    pub interval_millis: u64,
    /// Most characters replaced in a single scramble frame.
    pub max_chars: usize,
}

impl Default for GlitchSpec {
    fn default() -> Self {
        Self {
            charset: "#002A9C3%404@$&*".to_string(),
            steps: 8,
            step_millis: 60,
            interval_millis: 15_000,
            max_chars: 3,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Idle { next_burst_at: Option<u64> },
    Scrambling { step: u32, next_step_at: u64 },
}

/// Periodically scrambles a headline and restores it, one burst per
/// interval, driven frame by frame off the runtime's clock.
///
/// The ticker keeps itself armed until it is cancelled or dropped; the
/// frame callback only holds the state weakly, so dropping the ticker is
/// enough to end the loop.
pub struct GlitchTicker {
    inner: Rc<RefCell<GlitchInner>>,
}

struct GlitchInner {
    runtime: RuntimeHandle,
    source: Vec<char>,
    glyphs: Vec<char>,
    display: String,
    spec: GlitchSpec,
    rng: StdRng,
    phase: Phase,
    registration: Option<FrameCallbackRegistration>,
}

impl GlitchTicker {
    pub fn start(
        runtime: RuntimeHandle,
        text: impl Into<String>,
        spec: GlitchSpec,
        rng: StdRng,
    ) -> Self {
        let text = text.into();
        let inner = Rc::new(RefCell::new(GlitchInner {
            runtime,
            source: text.chars().collect(),
            glyphs: spec.charset.chars().collect(),
            display: text,
            spec,
            rng,
            phase: Phase::Idle {
                next_burst_at: None,
            },
            registration: None,
        }));
        GlitchInner::schedule_frame(&inner);
        Self { inner }
    }

    /// The text to render this frame.
    pub fn text(&self) -> String {
        self.inner.borrow().display.clone()
    }

    pub fn is_scrambling(&self) -> bool {
        matches!(self.inner.borrow().phase, Phase::Scrambling { .. })
    }

    /// Stops the ticker and restores the original text. Idempotent.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.display = inner.source.iter().collect();
        inner.phase = Phase::Idle {
            next_burst_at: None,
        };
    }
}

impl GlitchInner {
    fn schedule_frame(this: &Rc<RefCell<Self>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                GlitchInner::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<Self>>, frame_time_nanos: u64) {
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            let interval_nanos = inner.spec.interval_millis.saturating_mul(1_000_000);
            let step_nanos = inner.spec.step_millis.saturating_mul(1_000_000);

            let phase = inner.phase;
            match phase {
                Phase::Idle {
                    next_burst_at: None,
                } => {
                    inner.phase = Phase::Idle {
                        next_burst_at: Some(frame_time_nanos.saturating_add(interval_nanos)),
                    };
                }
                Phase::Idle {
                    next_burst_at: Some(at),
                } if frame_time_nanos >= at => {
                    inner.scramble();
                    inner.phase = Phase::Scrambling {
                        step: 1,
                        next_step_at: frame_time_nanos.saturating_add(step_nanos),
                    };
                }
                Phase::Scrambling { step, next_step_at } if frame_time_nanos >= next_step_at => {
                    if step >= inner.spec.steps {
                        inner.display = inner.source.iter().collect();
                        inner.phase = Phase::Idle {
                            next_burst_at: Some(frame_time_nanos.saturating_add(interval_nanos)),
                        };
                    } else {
                        inner.scramble();
                        inner.phase = Phase::Scrambling {
                            step: step + 1,
                            next_step_at: frame_time_nanos.saturating_add(step_nanos),
                        };
                    }
                }
                _ => {}
            }
        }
        Self::schedule_frame(this);
    }

    /// Rebuilds the display from the source with a few glyphs swapped in.
    fn scramble(&mut self) {
        if self.source.is_empty() || self.glyphs.is_empty() {
            return;
        }
        let mut chars = self.source.clone();
        let count = self.rng.gen_range(1..=self.spec.max_chars.max(1));
        for _ in 0..count {
            let index = self.rng.gen_range(0..chars.len());
            let glyph = self.glyphs[self.rng.gen_range(0..self.glyphs.len())];
            chars[index] = glyph;
        }
        self.display = chars.into_iter().collect();
    }
}
