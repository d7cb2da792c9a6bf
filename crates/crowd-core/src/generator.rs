//! Synthetic occupancy count generation.
//!
//! The active [`GenerationStrategy`] directly determines how often
//! locations alert, so it is fixed for the life of a deployment.
//!
//! | Strategy | Range |
//! |----------|-------|
//! | `threshold_relative` | uniform in `[0, threshold + margin]` |
//! | `absolute_range` | uniform in `[min, max]`, threshold ignored |
//! | `random_walk` | `previous ± [0, delta]`, clamped to `[0, threshold + margin]` |
//!
//! All arithmetic saturates; generation never fails.

use rand::Rng;

use crate::error::CoreError;

/// Reading generation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStrategy {
    /// Alerts fire with a bounded frequency relative to each threshold.
    ThresholdRelative {
        /// Headroom above the threshold.
        margin: u32,
    },
    /// Flat range independent of thresholds.
    AbsoluteRange {
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
    /// Continuity between successive reads. The first reading is drawn
    /// as in [`GenerationStrategy::ThresholdRelative`].
    RandomWalk {
        /// Maximum step size per reading.
        delta: u32,
        /// Headroom above the threshold that caps the walk.
        margin: u32,
    },
}

impl GenerationStrategy {
    /// The configuration tag of this strategy.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ThresholdRelative { .. } => "threshold_relative",
            Self::AbsoluteRange { .. } => "absolute_range",
            Self::RandomWalk { .. } => "random_walk",
        }
    }
}

impl Default for GenerationStrategy {
    fn default() -> Self {
        Self::ThresholdRelative { margin: 40 }
    }
}

/// Produces occupancy counts according to a fixed strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadingGenerator {
    strategy: GenerationStrategy,
}

impl ReadingGenerator {
    /// Create a generator for `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRange`] if an absolute range has
    /// `min > max`.
    pub const fn new(strategy: GenerationStrategy) -> Result<Self, CoreError> {
        if let GenerationStrategy::AbsoluteRange { min, max } = strategy {
            if min > max {
                return Err(CoreError::InvalidRange { min, max });
            }
        }
        Ok(Self { strategy })
    }

    /// The active strategy.
    pub const fn strategy(&self) -> GenerationStrategy {
        self.strategy
    }

    /// Draw a count for a location with the given `threshold`.
    ///
    /// `previous` is the location's latest recorded count, consulted only
    /// by the random walk.
    pub fn generate(&self, threshold: u32, previous: Option<u32>, rng: &mut impl Rng) -> u32 {
        match self.strategy {
            GenerationStrategy::ThresholdRelative { margin } => {
                rng.random_range(0..=threshold.saturating_add(margin))
            }
            GenerationStrategy::AbsoluteRange { min, max } => rng.random_range(min..=max),
            GenerationStrategy::RandomWalk { delta, margin } => {
                let ceiling = threshold.saturating_add(margin);
                match previous {
                    None => rng.random_range(0..=ceiling),
                    Some(prev) => {
                        let step = rng.random_range(0..=delta);
                        let next = if rng.random_bool(0.5) {
                            prev.saturating_add(step)
                        } else {
                            prev.saturating_sub(step)
                        };
                        next.min(ceiling)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn threshold_relative_stays_in_bounds() {
        let generator = ReadingGenerator::new(GenerationStrategy::ThresholdRelative { margin: 40 });
        assert!(generator.is_ok());
        let generator = generator.ok().unwrap_or_default();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut saw_alert = false;
        let mut saw_calm = false;
        for _ in 0..2000 {
            let count = generator.generate(60, None, &mut rng);
            assert!(count <= 100, "count {count} above threshold + margin");
            if count >= 60 {
                saw_alert = true;
            } else {
                saw_calm = true;
            }
        }
        assert!(saw_alert && saw_calm);
    }

    #[test]
    fn threshold_relative_ignores_previous() {
        let generator = ReadingGenerator::default();
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..500 {
            assert!(generator.generate(10, Some(10_000), &mut rng) <= 50);
        }
    }

    #[test]
    fn threshold_relative_saturates_at_max() {
        let generator = ReadingGenerator::default();
        let mut rng = SmallRng::seed_from_u64(3);
        // Must not overflow when threshold + margin exceeds u32::MAX.
        let _ = generator.generate(u32::MAX, None, &mut rng);
    }

    #[test]
    fn absolute_range_ignores_threshold() {
        let generator = ReadingGenerator::new(GenerationStrategy::AbsoluteRange { min: 5, max: 1000 })
            .ok()
            .unwrap_or_default();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut max_seen = 0;
        for _ in 0..2000 {
            let count = generator.generate(30, None, &mut rng);
            assert!((5..=1000).contains(&count));
            max_seen = max_seen.max(count);
        }
        // The flat range reaches far above a small threshold.
        assert!(max_seen > 70);
    }

    #[test]
    fn absolute_range_degenerate_is_constant() {
        let generator = ReadingGenerator::new(GenerationStrategy::AbsoluteRange { min: 7, max: 7 })
            .ok()
            .unwrap_or_default();
        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(generator.generate(100, None, &mut rng), 7);
    }

    #[test]
    fn absolute_range_rejects_inverted_bounds() {
        assert!(matches!(
            ReadingGenerator::new(GenerationStrategy::AbsoluteRange { min: 10, max: 5 }),
            Err(CoreError::InvalidRange { min: 10, max: 5 })
        ));
    }

    #[test]
    fn random_walk_steps_are_bounded() {
        let strategy = GenerationStrategy::RandomWalk {
            delta: 5,
            margin: 40,
        };
        let generator = ReadingGenerator::new(strategy).ok().unwrap_or_default();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut prev = generator.generate(60, None, &mut rng);
        assert!(prev <= 100);
        for _ in 0..1000 {
            let next = generator.generate(60, Some(prev), &mut rng);
            assert!(next.abs_diff(prev) <= 5, "step {prev} -> {next} too large");
            assert!(next <= 100);
            prev = next;
        }
    }

    #[test]
    fn random_walk_clamps_at_zero() {
        let strategy = GenerationStrategy::RandomWalk {
            delta: 50,
            margin: 0,
        };
        let generator = ReadingGenerator::new(strategy).ok().unwrap_or_default();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..200 {
            let next = generator.generate(10, Some(0), &mut rng);
            assert!(next <= 10);
        }
    }

    #[test]
    fn strategy_names() {
        assert_eq!(GenerationStrategy::default().name(), "threshold_relative");
        assert_eq!(
            GenerationStrategy::AbsoluteRange { min: 0, max: 1 }.name(),
            "absolute_range"
        );
        assert_eq!(
            GenerationStrategy::RandomWalk { delta: 1, margin: 1 }.name(),
            "random_walk"
        );
    }
}
