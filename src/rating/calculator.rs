//! Rating calculator trait and implementations
//!
//! This module defines the interface through which attempts are rated and
//! provides simple implementations for dry runs and testing.

use crate::config::RatingConfig;
use crate::types::{
    Attempt, AttemptDiagnostics, AttemptOutcome, Inactivity, RatingChange, RatingState,
};

/// Trait for rating a single player/puzzle attempt
pub trait RatingCalculator: Send + Sync {
    /// Compute the new ratings of both sides of an attempt
    ///
    /// # Arguments
    /// * `player` - Current player rating and uncertainty
    /// * `puzzle` - Current puzzle rating and uncertainty
    /// * `attempt` - Timing and correctness of the answer
    /// * `inactivity` - Days since each side last interacted
    fn rate_attempt(
        &self,
        player: &RatingState,
        puzzle: &RatingState,
        attempt: &Attempt,
        inactivity: Inactivity,
    ) -> crate::error::Result<AttemptOutcome>;

    /// Get the initial rating for new players and puzzles
    fn get_initial_rating(&self) -> RatingState;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;
}

/// Calculator that leaves every rating unchanged
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    initial_rating: RatingState,
}

impl NoOpRatingCalculator {
    /// Create a new no-op rating calculator
    pub fn new(initial_rating: RatingState) -> Self {
        Self { initial_rating }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        let config = RatingConfig::default();
        Self::new(RatingState::new(
            config.initial_rating,
            config.initial_uncertainty,
        ))
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn rate_attempt(
        &self,
        player: &RatingState,
        puzzle: &RatingState,
        _attempt: &Attempt,
        _inactivity: Inactivity,
    ) -> crate::error::Result<AttemptOutcome> {
        Ok(AttemptOutcome {
            player: RatingChange {
                old: *player,
                new: *player,
            },
            puzzle: RatingChange {
                old: *puzzle,
                new: *puzzle,
            },
            diagnostics: AttemptDiagnostics {
                hshs: 0.0,
                expectation: 0.0,
                k_player: 0.0,
                k_puzzle: 0.0,
            },
        })
    }

    fn get_initial_rating(&self) -> RatingState {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_rating": self.initial_rating.rating,
            "initial_uncertainty": self.initial_rating.uncertainty
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        if let Some(rating) = config.get("initial_rating").and_then(|v| v.as_f64()) {
            self.initial_rating.rating = rating;
        }
        if let Some(uncertainty) = config.get("initial_uncertainty").and_then(|v| v.as_f64()) {
            self.initial_rating.uncertainty = crate::types::clamp_uncertainty(uncertainty);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_calculator() {
        let calculator = NoOpRatingCalculator::default();
        let player = RatingState::new(12.0, 0.4);
        let puzzle = RatingState::new(8.0, 0.7);

        let outcome = calculator
            .rate_attempt(
                &player,
                &puzzle,
                &Attempt::new(10.0, 600.0, true),
                Inactivity::default(),
            )
            .unwrap();

        assert_eq!(outcome.player.old, outcome.player.new);
        assert_eq!(outcome.puzzle.old, outcome.puzzle.new);
        assert_eq!(outcome.player.new, player);
        assert_eq!(outcome.diagnostics.k_player, 0.0);
    }

    #[test]
    fn test_noop_initial_rating_follows_config_defaults() {
        let config = RatingConfig::default();
        let initial = NoOpRatingCalculator::default().get_initial_rating();

        assert_eq!(initial.rating, config.initial_rating);
        assert_eq!(initial.uncertainty, config.initial_uncertainty);
    }

    #[test]
    fn test_noop_calculator_config() {
        let mut calculator = NoOpRatingCalculator::default();
        assert_eq!(calculator.get_initial_rating().rating, 10.0);
        assert_eq!(calculator.config()["type"], "no_op");

        calculator
            .update_config(serde_json::json!({
                "initial_rating": 0.0,
                "initial_uncertainty": 3.0
            }))
            .unwrap();

        let updated = calculator.get_initial_rating();
        assert_eq!(updated.rating, 0.0);
        assert_eq!(updated.uncertainty, 1.0);
    }
}
