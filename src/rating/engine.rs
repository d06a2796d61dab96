//! Per-attempt orchestration of the dual rating update
//!
//! The sequence is fixed:
//! 1. decay both uncertainties (identity when frozen),
//! 2. derive K-factors from the post-decay uncertainties,
//! 3. score the attempt against the pre-update ratings,
//! 4. move both ratings.
//!
//! Everything is computed before anything is written, so a rejected attempt
//! leaves both entities untouched.

use crate::config::RatingConfig;
use crate::error::RatingError;
use crate::rating::calculator::RatingCalculator;
use crate::rating::k_factor::DynamicKFactor;
use crate::rating::performance::PerformanceScorer;
use crate::rating::uncertainty::UncertaintyTracker;
use crate::rating::updater::RatingUpdater;
use crate::types::{
    Attempt, AttemptDiagnostics, AttemptOutcome, Inactivity, Rated, RatedEntity, RatingChange,
    RatingState,
};
use crate::utils::days_since;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Rates attempts with HSHS scoring and uncertainty-weighted K-factors
#[derive(Debug, Clone)]
pub struct RatingEngine {
    config: RatingConfig,
    tracker: UncertaintyTracker,
    k_factor: DynamicKFactor,
    scorer: PerformanceScorer,
    updater: RatingUpdater,
}

impl RatingEngine {
    /// Create a new engine from a validated configuration
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self {
            tracker: UncertaintyTracker::from_config(&config),
            k_factor: DynamicKFactor::from_config(&config),
            scorer: PerformanceScorer::from_config(&config),
            updater: RatingUpdater::new(),
            config,
        })
    }

    pub fn settings(&self) -> &RatingConfig {
        &self.config
    }

    pub fn tracker(&self) -> &UncertaintyTracker {
        &self.tracker
    }

    pub fn k_factor(&self) -> &DynamicKFactor {
        &self.k_factor
    }

    pub fn scorer(&self) -> &PerformanceScorer {
        &self.scorer
    }

    /// Rating and uncertainty for an entity seen for the first time
    pub fn default_state(&self) -> RatingState {
        RatingState {
            rating: self.config.initial_rating,
            uncertainty: self.config.initial_uncertainty,
        }
    }

    /// Compute the outcome of an attempt without touching either entity
    pub fn evaluate<P, Q>(
        &self,
        player: &P,
        puzzle: &Q,
        attempt: &Attempt,
        inactivity: Inactivity,
    ) -> crate::error::Result<AttemptOutcome>
    where
        P: Rated + ?Sized,
        Q: Rated + ?Sized,
    {
        let player_old = player.state();
        let puzzle_old = puzzle.state();

        let player_uncertainty = self
            .tracker
            .decay(player_old.uncertainty, inactivity.player_days)?;
        let puzzle_uncertainty = self
            .tracker
            .decay(puzzle_old.uncertainty, inactivity.puzzle_days)?;

        let k = self.k_factor.compute(player_uncertainty, puzzle_uncertainty);

        let score = self.scorer.score(
            attempt.response_time_seconds,
            player_old.rating,
            puzzle_old.rating,
            attempt.time_limit_seconds,
            attempt.correct,
        )?;

        let (player_rating, puzzle_rating) =
            self.updater
                .apply(player, puzzle, k, score.hshs, score.expectation);

        debug!(
            hshs = score.hshs,
            expectation = score.expectation,
            k_player = k.player,
            k_puzzle = k.puzzle,
            player_delta = player_rating - player_old.rating,
            puzzle_delta = puzzle_rating - puzzle_old.rating,
            "Rated attempt"
        );

        Ok(AttemptOutcome {
            player: RatingChange {
                old: player_old,
                new: RatingState {
                    rating: player_rating,
                    uncertainty: player_uncertainty,
                },
            },
            puzzle: RatingChange {
                old: puzzle_old,
                new: RatingState {
                    rating: puzzle_rating,
                    uncertainty: puzzle_uncertainty,
                },
            },
            diagnostics: AttemptDiagnostics {
                hshs: score.hshs,
                expectation: score.expectation,
                k_player: k.player,
                k_puzzle: k.puzzle,
            },
        })
    }

    /// Rate an attempt and write the new values into both entities.
    ///
    /// On error neither entity is modified.
    pub fn calculate_elo<P, Q>(
        &self,
        player: &mut P,
        puzzle: &mut Q,
        attempt: &Attempt,
        inactivity: Inactivity,
    ) -> crate::error::Result<AttemptOutcome>
    where
        P: Rated + ?Sized,
        Q: Rated + ?Sized,
    {
        let outcome = self.evaluate(&*player, &*puzzle, attempt, inactivity)?;

        player.set_uncertainty(outcome.player.new.uncertainty);
        puzzle.set_uncertainty(outcome.puzzle.new.uncertainty);
        player.set_rating(outcome.player.new.rating);
        puzzle.set_rating(outcome.puzzle.new.rating);

        Ok(outcome)
    }

    /// Like [`calculate_elo`](Self::calculate_elo), deriving each side's
    /// inactivity from its last interaction time.
    ///
    /// Timestamps are left to the caller; the store layer stamps them once the
    /// update is persisted.
    pub fn calculate_elo_at(
        &self,
        player: &mut RatedEntity,
        puzzle: &mut RatedEntity,
        attempt: &Attempt,
        now: DateTime<Utc>,
    ) -> crate::error::Result<AttemptOutcome> {
        let inactivity = Inactivity {
            player_days: days_since(player.last_interaction, now),
            puzzle_days: days_since(puzzle.last_interaction, now),
        };
        self.calculate_elo(player, puzzle, attempt, inactivity)
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        let config = RatingConfig::default();
        Self {
            tracker: UncertaintyTracker::from_config(&config),
            k_factor: DynamicKFactor::from_config(&config),
            scorer: PerformanceScorer::from_config(&config),
            updater: RatingUpdater::new(),
            config,
        }
    }
}

impl RatingCalculator for RatingEngine {
    fn rate_attempt(
        &self,
        player: &RatingState,
        puzzle: &RatingState,
        attempt: &Attempt,
        inactivity: Inactivity,
    ) -> crate::error::Result<AttemptOutcome> {
        self.evaluate(player, puzzle, attempt, inactivity)
    }

    fn get_initial_rating(&self) -> RatingState {
        self.default_state()
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let new_config: RatingConfig =
            serde_json::from_value(config).map_err(|e| RatingError::ConfigurationError {
                message: format!("Invalid rating configuration: {}", e),
            })?;

        *self = Self::new(new_config)?;
        Ok(())
    }
}
