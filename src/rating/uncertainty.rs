//! Time decay of rating confidence
//!
//! Every attempt lowers an entity's uncertainty by a fixed step, and every day
//! of inactivity before it raises the uncertainty again. The result is always
//! clamped into [0, 1].

use crate::config::RatingConfig;
use crate::error::RatingError;

/// Applies activity and inactivity to an uncertainty value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyTracker {
    decay_step: f64,
    inactivity_rate: f64,
    frozen: bool,
}

impl UncertaintyTracker {
    pub fn new(decay_step: f64, inactivity_rate: f64) -> Self {
        Self {
            decay_step,
            inactivity_rate,
            frozen: false,
        }
    }

    /// A tracker that never changes uncertainty
    pub fn frozen() -> Self {
        let defaults = RatingConfig::default();
        Self {
            decay_step: defaults.decay_step,
            inactivity_rate: defaults.inactivity_rate,
            frozen: true,
        }
    }

    pub fn from_config(config: &RatingConfig) -> Self {
        Self {
            decay_step: config.decay_step,
            inactivity_rate: config.inactivity_rate,
            frozen: config.frozen,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// `U' = clamp(U - decay_step + days * inactivity_rate, 0, 1)`.
    ///
    /// A frozen tracker returns `current` for any input. Otherwise the
    /// uncertainty must already lie in [0, 1] and `days_since_last_play` must be
    /// non-negative; both are caller invariants and are rejected, not clamped.
    pub fn decay(&self, current: f64, days_since_last_play: f64) -> crate::error::Result<f64> {
        if self.frozen {
            return Ok(current);
        }

        if !(0.0..=1.0).contains(&current) {
            return Err(RatingError::InvalidUncertainty {
                uncertainty: current,
            }
            .into());
        }

        if !days_since_last_play.is_finite() || days_since_last_play < 0.0 {
            return Err(RatingError::InvalidInactivity {
                days: days_since_last_play,
            }
            .into());
        }

        let updated = current - self.decay_step + days_since_last_play * self.inactivity_rate;
        Ok(updated.clamp(0.0, 1.0))
    }

    /// Inactivity at which one attempt leaves uncertainty unchanged
    pub fn break_even_days(&self) -> f64 {
        if self.inactivity_rate == 0.0 {
            return f64::INFINITY;
        }
        self.decay_step / self.inactivity_rate
    }
}

impl Default for UncertaintyTracker {
    fn default() -> Self {
        Self::from_config(&RatingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn iterate(tracker: &UncertaintyTracker, start: f64, days: f64, rounds: usize) -> f64 {
        let mut u = start;
        for _ in 0..rounds {
            u = tracker.decay(u, days).unwrap();
        }
        u
    }

    #[test]
    fn test_baseline_forgetting() {
        let tracker = UncertaintyTracker::default();
        let updated = tracker.decay(0.5, 0.0).unwrap();
        assert!((updated - 0.475).abs() < 1e-12);
    }

    #[test]
    fn test_inactivity_raises_uncertainty() {
        let tracker = UncertaintyTracker::default();
        // 0.5 - 0.025 + 3/30
        let updated = tracker.decay(0.5, 3.0).unwrap();
        assert!((updated - 0.575).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_at_bounds() {
        let tracker = UncertaintyTracker::default();
        assert_eq!(tracker.decay(0.01, 0.0).unwrap(), 0.0);
        assert_eq!(tracker.decay(0.9, 30.0).unwrap(), 1.0);
    }

    #[test]
    fn test_negative_inactivity_rejected() {
        let tracker = UncertaintyTracker::default();
        let err = tracker.decay(0.5, -1.0).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RatingError>(),
            Some(&RatingError::InvalidInactivity { days: -1.0 })
        );
        assert!(tracker.decay(0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_out_of_range_uncertainty_rejected() {
        let tracker = UncertaintyTracker::default();
        for bad in [-0.1, 1.1, f64::NAN] {
            let err = tracker.decay(bad, 0.0).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<RatingError>(),
                Some(RatingError::InvalidUncertainty { .. })
            ));
        }
    }

    #[test]
    fn test_break_even_days() {
        let tracker = UncertaintyTracker::default();
        let break_even = tracker.break_even_days();
        assert!((break_even - 0.75).abs() < 1e-12);

        let u = iterate(&tracker, 0.4, break_even, 50);
        assert!((u - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_drift_below_and_above_break_even() {
        let tracker = UncertaintyTracker::default();

        // Short gaps drift toward full confidence
        assert_eq!(iterate(&tracker, 0.6, 0.25, 200), 0.0);

        // Long gaps drift toward full uncertainty, including 4/3 days
        assert_eq!(iterate(&tracker, 0.2, 4.0 / 3.0, 200), 1.0);
    }

    #[test]
    fn test_no_inactivity_rate_never_breaks_even() {
        let tracker = UncertaintyTracker::new(0.025, 0.0);
        assert!(tracker.break_even_days().is_infinite());
    }

    proptest! {
        #[test]
        fn prop_decay_stays_in_unit_interval(u in 0.0f64..=1.0, days in 0.0f64..10_000.0) {
            let updated = UncertaintyTracker::default().decay(u, days).unwrap();
            prop_assert!((0.0..=1.0).contains(&updated));
        }

        #[test]
        fn prop_frozen_is_identity(u in -5.0f64..5.0, days in -100.0f64..100.0) {
            let tracker = UncertaintyTracker::frozen();
            prop_assert_eq!(tracker.decay(u, days).unwrap(), u);
        }
    }
}
