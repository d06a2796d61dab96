//! Uncertainty-weighted dynamic K-factors
//!
//! Each side's sensitivity grows with its own uncertainty and shrinks with the
//! opponent's, so a well-known puzzle moves a fresh player a lot while barely
//! moving itself.

use crate::config::{NegativeKPolicy, RatingConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Update sensitivities for one attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KFactors {
    pub player: f64,
    pub puzzle: f64,
}

/// Computes [`KFactors`] from post-decay uncertainties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicKFactor {
    base_k: f64,
    amplify: f64,
    dampen: f64,
    negative_policy: NegativeKPolicy,
}

impl DynamicKFactor {
    pub fn new(base_k: f64, amplify: f64, dampen: f64, negative_policy: NegativeKPolicy) -> Self {
        Self {
            base_k,
            amplify,
            dampen,
            negative_policy,
        }
    }

    pub fn from_config(config: &RatingConfig) -> Self {
        Self::new(
            config.base_k,
            config.amplify,
            config.dampen,
            config.negative_k_policy,
        )
    }

    /// ```text
    /// K_player = base_k * (1 + amplify*U_player - dampen*U_puzzle)
    /// K_puzzle = base_k * (1 + amplify*U_puzzle - dampen*U_player)
    /// ```
    /// Both uncertainties must already include this attempt's decay.
    pub fn compute(&self, player_uncertainty: f64, puzzle_uncertainty: f64) -> KFactors {
        let player = self.raw(player_uncertainty, puzzle_uncertainty);
        let puzzle = self.raw(puzzle_uncertainty, player_uncertainty);

        KFactors {
            player: self.apply_policy(player, "player"),
            puzzle: self.apply_policy(puzzle, "puzzle"),
        }
    }

    fn raw(&self, own: f64, other: f64) -> f64 {
        self.base_k * (1.0 + self.amplify * own - self.dampen * other)
    }

    fn apply_policy(&self, k: f64, side: &str) -> f64 {
        if k >= 0.0 {
            return k;
        }

        match self.negative_policy {
            NegativeKPolicy::AllowSignFlip => {
                warn!(side, k, "Negative K-factor, rating will move against the score gap");
                k
            }
            NegativeKPolicy::ClampToZero => {
                warn!(side, k, "Negative K-factor clamped to zero");
                0.0
            }
        }
    }
}

impl Default for DynamicKFactor {
    fn default() -> Self {
        Self::from_config(&RatingConfig::default())
    }
}
