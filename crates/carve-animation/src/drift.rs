use carve_geometry::Vec2;

use crate::easing::Easing;
use crate::lerp::Lerp;

/// Looping keyframe tracks for ambient "floating" motion.
///
/// Each channel is a list of keyframe values swept in order over one
/// cycle, eased per segment, then repeated forever. Offsets are relative
/// to the marker's resting position; rotation is in degrees; scale is a
/// multiplier. An empty track contributes its channel's resting value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriftSpec {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub rotation: Vec<f64>,
    pub scale: Vec<f64>,
    pub duration_millis: u64,
    pub delay_millis: u64,
    pub easing: Easing,
}

impl Default for DriftSpec {
    fn default() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            rotation: Vec::new(),
            scale: Vec::new(),
            duration_millis: 6_000,
            delay_millis: 0,
            easing: Easing::EaseInOut,
        }
    }
}

/// One channel-by-channel sample of a [`DriftSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftOffset {
    pub offset: Vec2,
    pub rotation: f64,
    pub scale: f64,
}

impl DriftOffset {
    pub const REST: DriftOffset = DriftOffset {
        offset: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
    };
}

impl DriftSpec {
    /// Samples the loop at `elapsed_nanos` since the marker mounted.
    ///
    /// Pure phase computation from the timestamp, so irregular frame
    /// intervals cannot accumulate drift. Before the delay has passed
    /// (and for a zero duration) every channel holds its first keyframe.
    pub fn sample(&self, elapsed_nanos: u64) -> DriftOffset {
        let phase = self.phase(elapsed_nanos);
        DriftOffset {
            offset: Vec2::new(
                sample_track(&self.x, phase, self.easing, 0.0),
                sample_track(&self.y, phase, self.easing, 0.0),
            ),
            rotation: sample_track(&self.rotation, phase, self.easing, 0.0),
            scale: sample_track(&self.scale, phase, self.easing, 1.0),
        }
    }

    /// True when every track is empty, i.e. sampling always rests.
    pub fn is_static(&self) -> bool {
        self.x.is_empty() && self.y.is_empty() && self.rotation.is_empty() && self.scale.is_empty()
    }

    fn phase(&self, elapsed_nanos: u64) -> f64 {
        let delay_nanos = self.delay_millis.saturating_mul(1_000_000);
        let duration_nanos = self.duration_millis.saturating_mul(1_000_000);
        if duration_nanos == 0 || elapsed_nanos < delay_nanos {
            return 0.0;
        }
        let cycle_nanos = (elapsed_nanos - delay_nanos) % duration_nanos;
        cycle_nanos as f64 / duration_nanos as f64
    }
}

fn sample_track(track: &[f64], phase: f64, easing: Easing, rest: f64) -> f64 {
    match track.len() {
        0 => rest,
        1 => track[0],
        len => {
            let segments = (len - 1) as f64;
            let scaled = phase.clamp(0.0, 1.0) * segments;
            let index = (scaled.floor() as usize).min(len - 2);
            let local = scaled - index as f64;
            track[index].lerp(&track[index + 1], easing.transform(local))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> DriftSpec {
        DriftSpec {
            y: vec![0.0, -20.0, 0.0],
            rotation: vec![0.0, 360.0],
            duration_millis: 4_000,
            easing: Easing::Linear,
            ..DriftSpec::default()
        }
    }

    #[test]
    fn empty_tracks_rest() {
        let spec = DriftSpec::default();
        assert!(spec.is_static());
        assert_eq!(spec.sample(123_456_789), DriftOffset::REST);
    }

    #[test]
    fn single_keyframe_is_constant() {
        let spec = DriftSpec {
            scale: vec![1.2],
            ..DriftSpec::default()
        };
        assert_eq!(spec.sample(0).scale, 1.2);
        assert_eq!(spec.sample(9_000_000_000).scale, 1.2);
    }

    #[test]
    fn cycle_repeats_exactly() {
        let spec = bob();
        let period = 4_000_000_000;
        for t in [0, 500_000_000, 1_750_000_000, 3_999_999_999] {
            assert_eq!(spec.sample(t), spec.sample(t + period));
        }
    }

    #[test]
    fn keyframes_sweep_in_order() {
        let spec = bob();
        // Quarter cycle: halfway through the first y segment.
        assert_eq!(spec.sample(1_000_000_000).offset.y, -10.0);
        // Half cycle: at the middle keyframe.
        assert_eq!(spec.sample(2_000_000_000).offset.y, -20.0);
        assert_eq!(spec.sample(2_000_000_000).rotation, 180.0);
    }

    #[test]
    fn delay_holds_the_first_keyframe() {
        let spec = DriftSpec {
            y: vec![5.0, 15.0],
            delay_millis: 1_000,
            duration_millis: 2_000,
            easing: Easing::Linear,
            ..DriftSpec::default()
        };
        assert_eq!(spec.sample(0).offset.y, 5.0);
        assert_eq!(spec.sample(999_999_999).offset.y, 5.0);
        // One second after the delay elapses the sweep is halfway.
        assert_eq!(spec.sample(2_000_000_000).offset.y, 10.0);
    }

    #[test]
    fn zero_duration_clamps_to_first_keyframe() {
        let spec = DriftSpec {
            x: vec![3.0, 9.0],
            duration_millis: 0,
            ..DriftSpec::default()
        };
        assert_eq!(spec.sample(42).offset.x, 3.0);
    }
}
