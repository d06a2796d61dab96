//! High-Speed-High-Stakes scoring
//!
//! The observed score of an attempt is
//!
//! ```text
//! s = (2x - 1) * a * (d - t)
//! ```
//!
//! for correctness `x`, time limit `d`, response time `t` and discrimination `a`.
//! Its expectation under a rating gap `delta = theta - beta` is
//!
//! ```text
//! E[s] = a*d * (e^(2*a*d*delta) + 1) / (e^(2*a*d*delta) - 1) - 1/delta
//! ```
//!
//! which equals `a*d * coth(a*d*delta) - 1/delta`. The hyperbolic form is what
//! is evaluated here since it stays finite for any rating gap.

use crate::config::{DiscriminationMode, EpsilonPolicy, RatingConfig};
use crate::error::RatingError;
use crate::utils::rating_difference;
use serde::{Deserialize, Serialize};

/// Observed and expected score of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    pub hshs: f64,
    pub expectation: f64,
    pub discrimination: f64,
    pub time_component: f64,
    /// Rating gap after the epsilon substitution
    pub delta: f64,
}

/// Scores attempts and predicts their expected score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceScorer {
    epsilon: f64,
    epsilon_policy: EpsilonPolicy,
    discrimination_mode: DiscriminationMode,
}

impl PerformanceScorer {
    pub fn new(
        epsilon: f64,
        epsilon_policy: EpsilonPolicy,
        discrimination_mode: DiscriminationMode,
    ) -> Self {
        Self {
            epsilon,
            epsilon_policy,
            discrimination_mode,
        }
    }

    pub fn from_config(config: &RatingConfig) -> Self {
        Self::new(
            config.epsilon,
            config.epsilon_policy,
            config.discrimination_mode,
        )
    }

    /// Score an attempt against the pre-update ratings.
    ///
    /// Fails with `InvalidTimeLimit` before anything else is computed when the
    /// time limit is not a positive finite number.
    pub fn score(
        &self,
        response_time_seconds: f64,
        player_rating: f64,
        puzzle_rating: f64,
        time_limit_seconds: f64,
        correct: bool,
    ) -> crate::error::Result<PerformanceScore> {
        validate_time_limit(time_limit_seconds)?;

        if !response_time_seconds.is_finite() || response_time_seconds < 0.0 {
            return Err(RatingError::InvalidResponseTime {
                response_time_seconds,
            }
            .into());
        }

        let discrimination = self.discrimination(time_limit_seconds);
        let time_component = discrimination * (time_limit_seconds - response_time_seconds);
        let hshs = if correct {
            time_component
        } else {
            -time_component
        };

        let delta = self.effective_delta(rating_difference(player_rating, puzzle_rating));
        let expectation = expected_score(discrimination, time_limit_seconds, delta);

        Ok(PerformanceScore {
            hshs,
            expectation,
            discrimination,
            time_component,
            delta,
        })
    }

    /// Item discrimination `a` for a time limit
    pub fn discrimination(&self, time_limit_seconds: f64) -> f64 {
        match self.discrimination_mode {
            DiscriminationMode::InverseTimeLimit => 1.0 / time_limit_seconds,
            DiscriminationMode::Fixed { value } => value,
        }
    }

    /// Replace a gap inside the epsilon band according to the configured policy
    pub fn effective_delta(&self, delta: f64) -> f64 {
        if delta.abs() >= self.epsilon {
            return delta;
        }

        match self.epsilon_policy {
            EpsilonPolicy::SignPreserving if delta < 0.0 => -self.epsilon,
            EpsilonPolicy::SignPreserving | EpsilonPolicy::Literal => self.epsilon,
        }
    }
}

impl Default for PerformanceScorer {
    fn default() -> Self {
        Self::from_config(&RatingConfig::default())
    }
}

fn validate_time_limit(time_limit_seconds: f64) -> crate::error::Result<()> {
    if !time_limit_seconds.is_finite() || time_limit_seconds <= 0.0 {
        return Err(RatingError::InvalidTimeLimit { time_limit_seconds }.into());
    }
    Ok(())
}

/// `a*d * coth(a*d*delta) - 1/delta`; `delta` must be non-zero.
fn expected_score(discrimination: f64, time_limit_seconds: f64, delta: f64) -> f64 {
    let scale = discrimination * time_limit_seconds;
    let weight = 2.0 * scale * delta;
    scale / (weight / 2.0).tanh() - 1.0 / delta
}
