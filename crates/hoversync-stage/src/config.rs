//! Stage configuration: gesture tuning and idle animation

use serde::{Deserialize, Serialize};

/// Configuration for the presentation controller
///
/// Scale bounds apply per axis on every write; the remaining values tune
/// the drag gesture and the purely local idle bob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Smallest allowed scale per axis
    min_scale: f32,
    /// Largest allowed scale per axis
    max_scale: f32,
    /// Scale units per unit of accumulated vertical drag
    pub drag_sensitivity: f32,
    /// Peak height offset of the idle bob
    pub bob_amplitude: f32,
    /// Angular frequency of the idle bob, radians per second
    pub bob_frequency: f32,
}

impl StageConfig {
    /// Create a configuration with explicit scale bounds
    ///
    /// Bounds are reordered if given reversed.
    pub fn with_scale_bounds(min_scale: f32, max_scale: f32) -> Self {
        Self {
            min_scale: min_scale.min(max_scale),
            max_scale: max_scale.max(min_scale),
            ..Self::default()
        }
    }

    /// Smallest allowed scale per axis
    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    /// Largest allowed scale per axis
    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    /// Set the scale bounds, reordering if given reversed
    pub fn set_scale_bounds(&mut self, min_scale: f32, max_scale: f32) {
        self.min_scale = min_scale.min(max_scale);
        self.max_scale = max_scale.max(min_scale);
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 2.0,
            drag_sensitivity: 0.01,
            bob_amplitude: 0.05,
            bob_frequency: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_are_ordered() {
        let config = StageConfig::default();
        assert!(config.min_scale() < config.max_scale());
    }

    #[test]
    fn test_reversed_bounds_are_reordered() {
        let config = StageConfig::with_scale_bounds(2.0, 0.5);
        assert_eq!(config.min_scale(), 0.5);
        assert_eq!(config.max_scale(), 2.0);
    }

    #[test]
    fn test_set_scale_bounds() {
        let mut config = StageConfig::default();
        config.set_scale_bounds(0.25, 4.0);
        assert_eq!(config.min_scale(), 0.25);
        assert_eq!(config.max_scale(), 4.0);
    }
}
