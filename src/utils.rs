//! Utility functions for the rating engine

use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Fractional days elapsed between the last interaction and `now`.
///
/// An entity that never interacted counts as 0 days. The result is negative
/// when `last` lies after `now`; the uncertainty tracker rejects that.
pub fn days_since(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match last {
        Some(last) => (now - last).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY,
        None => 0.0,
    }
}

/// Signed skill gap between a player and a puzzle
pub fn rating_difference(player_rating: f64, puzzle_rating: f64) -> f64 {
    player_rating - puzzle_rating
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_days_since() {
        let now = current_timestamp();
        assert_eq!(days_since(None, now), 0.0);
        assert!((days_since(Some(now - Duration::days(3)), now) - 3.0).abs() < 1e-9);
        assert!((days_since(Some(now - Duration::hours(18)), now) - 0.75).abs() < 1e-9);
        assert!(days_since(Some(now + Duration::days(1)), now) < 0.0);
    }

    #[test]
    fn test_rating_difference() {
        assert_eq!(rating_difference(1.5, -1.5), 3.0);
        assert_eq!(rating_difference(-1.5, 1.5), -3.0);
        assert_eq!(rating_difference(10.0, 10.0), 0.0);
    }
}
