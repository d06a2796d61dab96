//! Common types used throughout the rating engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for players and puzzles
pub type EntityId = String;

/// Which side of an attempt an entity sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Puzzle,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Player => write!(f, "Player"),
            EntityKind::Puzzle => write!(f, "Puzzle"),
        }
    }
}

/// Storage key for a rated entity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityKey {
    pub fn player(id: impl Into<EntityId>) -> Self {
        Self {
            kind: EntityKind::Player,
            id: id.into(),
        }
    }

    pub fn puzzle(id: impl Into<EntityId>) -> Self {
        Self {
            kind: EntityKind::Puzzle,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Read/write access to the two numeric fields the engine works on.
///
/// Implemented for [`RatedEntity`] and [`RatingState`]; callers with their own
/// player or landmark records can implement it to be rated in place.
pub trait Rated {
    fn rating(&self) -> f64;
    fn set_rating(&mut self, rating: f64);
    fn uncertainty(&self) -> f64;
    fn set_uncertainty(&mut self, uncertainty: f64);

    /// Snapshot of the current values
    fn state(&self) -> RatingState {
        RatingState {
            rating: self.rating(),
            uncertainty: self.uncertainty(),
        }
    }
}

/// Rating and uncertainty of a single entity at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingState {
    pub rating: f64,
    pub uncertainty: f64,
}

impl RatingState {
    /// Build a state, clamping the uncertainty into [0, 1]
    pub fn new(rating: f64, uncertainty: f64) -> Self {
        Self {
            rating,
            uncertainty: clamp_uncertainty(uncertainty),
        }
    }
}

impl Rated for RatingState {
    fn rating(&self) -> f64 {
        self.rating
    }

    fn set_rating(&mut self, rating: f64) {
        self.rating = rating;
    }

    fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    fn set_uncertainty(&mut self, uncertainty: f64) {
        self.uncertainty = uncertainty;
    }
}

/// A player or a puzzle/landmark as held by the entity store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub rating: f64,
    pub uncertainty: f64,
    pub last_interaction: Option<DateTime<Utc>>,
    /// Number of rated attempts, maintained by the store layer
    pub attempts: u64,
}

impl RatedEntity {
    /// Create an entity, clamping the uncertainty into [0, 1]
    pub fn new(kind: EntityKind, id: impl Into<EntityId>, rating: f64, uncertainty: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            rating,
            uncertainty: clamp_uncertainty(uncertainty),
            last_interaction: None,
            attempts: 0,
        }
    }

    pub fn player(id: impl Into<EntityId>, rating: f64, uncertainty: f64) -> Self {
        Self::new(EntityKind::Player, id, rating, uncertainty)
    }

    pub fn puzzle(id: impl Into<EntityId>, rating: f64, uncertainty: f64) -> Self {
        Self::new(EntityKind::Puzzle, id, rating, uncertainty)
    }

    /// Set the last interaction time
    pub fn with_last_interaction(mut self, at: DateTime<Utc>) -> Self {
        self.last_interaction = Some(at);
        self
    }

    pub fn key(&self) -> EntityKey {
        EntityKey {
            kind: self.kind,
            id: self.id.clone(),
        }
    }

    /// Record that an attempt touching this entity was rated at `at`
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_interaction = Some(at);
        self.attempts += 1;
    }
}

impl Rated for RatedEntity {
    fn rating(&self) -> f64 {
        self.rating
    }

    fn set_rating(&mut self, rating: f64) {
        self.rating = rating;
    }

    fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    fn set_uncertainty(&mut self, uncertainty: f64) {
        self.uncertainty = uncertainty;
    }
}

/// One timed, correctness-graded answer to a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub response_time_seconds: f64,
    pub time_limit_seconds: f64,
    pub correct: bool,
}

impl Attempt {
    pub fn new(response_time_seconds: f64, time_limit_seconds: f64, correct: bool) -> Self {
        Self {
            response_time_seconds,
            time_limit_seconds,
            correct,
        }
    }

    /// Build an attempt from minute-denominated timings
    pub fn from_minutes(minutes_used: f64, time_limit_minutes: f64, correct: bool) -> Self {
        Self::new(minutes_used * 60.0, time_limit_minutes * 60.0, correct)
    }
}

/// Days since each side of an attempt last interacted
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Inactivity {
    pub player_days: f64,
    pub puzzle_days: f64,
}

impl Inactivity {
    pub fn new(player_days: f64, puzzle_days: f64) -> Self {
        Self {
            player_days,
            puzzle_days,
        }
    }
}

/// Before/after values for one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub old: RatingState,
    pub new: RatingState,
}

impl RatingChange {
    pub fn rating_delta(&self) -> f64 {
        self.new.rating - self.old.rating
    }

    pub fn uncertainty_delta(&self) -> f64 {
        self.new.uncertainty - self.old.uncertainty
    }
}

/// Intermediate values of one rating update, for logging and telemetry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptDiagnostics {
    pub hshs: f64,
    pub expectation: f64,
    pub k_player: f64,
    pub k_puzzle: f64,
}

/// Full result of rating one attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptOutcome {
    pub player: RatingChange,
    pub puzzle: RatingChange,
    pub diagnostics: AttemptDiagnostics,
}

/// Clamp into [0, 1]; NaN collapses to 1.0 (maximally uncertain)
pub fn clamp_uncertainty(uncertainty: f64) -> f64 {
    if uncertainty.is_nan() {
        1.0
    } else {
        uncertainty.clamp(0.0, 1.0)
    }
}
