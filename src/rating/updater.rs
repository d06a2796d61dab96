//! Final rating adjustment

use crate::rating::k_factor::KFactors;
use crate::types::Rated;

/// Moves both ratings by their K-factor times the score surprise.
///
/// The player gains what the puzzle loses in direction, but not in magnitude,
/// since the two K-factors generally differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingUpdater;

impl RatingUpdater {
    pub fn new() -> Self {
        Self
    }

    /// Returns `(new_player_rating, new_puzzle_rating)`; no bound is applied.
    pub fn apply<P, Q>(
        &self,
        player: &P,
        puzzle: &Q,
        k: KFactors,
        hshs: f64,
        expectation: f64,
    ) -> (f64, f64)
    where
        P: Rated + ?Sized,
        Q: Rated + ?Sized,
    {
        let surprise = hshs - expectation;
        (
            player.rating() + k.player * surprise,
            puzzle.rating() - k.puzzle * surprise,
        )
    }
}
