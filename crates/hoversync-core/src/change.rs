//! Epsilon-gated change detection for vector samples
//!
//! Drag gestures produce a new scale every frame; most of those samples are
//! floating-point jitter that would flood the transport. The detector keeps
//! the last transmitted sample as a baseline and only fires when a new
//! sample moves meaningfully away from it.

use glam::Vec3;

/// Stateful predicate deciding whether a vector sample is worth sending
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    epsilon: f32,
    baseline: Option<Vec3>,
}

impl ChangeDetector {
    /// Create a detector with the given epsilon
    pub fn new(epsilon: f32) -> Self {
        Self {
            epsilon,
            baseline: None,
        }
    }

    /// Get the configured epsilon
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Get the current baseline, if any sample has been accepted yet
    pub fn baseline(&self) -> Option<Vec3> {
        self.baseline
    }

    /// Check whether `sample` differs meaningfully from the baseline
    ///
    /// The first sample always fires and becomes the baseline. Later samples
    /// fire iff the largest per-axis distance from the baseline is strictly
    /// greater than epsilon; firing advances the baseline, a non-firing
    /// sample leaves it untouched.
    pub fn has_changed(&mut self, sample: Vec3) -> bool {
        match self.baseline {
            None => {
                self.baseline = Some(sample);
                true
            }
            Some(baseline) => {
                let delta = (sample - baseline).abs();
                if delta.max_element() > self.epsilon {
                    self.baseline = Some(sample);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Forget the baseline so the next sample fires unconditionally
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}
