//! Serialized attempt processing on top of an entity store
//!
//! The engine itself is lock-free and assumes exclusive access to the two
//! entities it rates. [`AttemptProcessor`] provides that exclusivity: it keeps
//! one mutex per entity key and holds both across load, rate and store, so two
//! attempts touching the same player (or puzzle) are applied one after the
//! other instead of racing on the same snapshot.

use crate::error::RatingError;
use crate::rating::calculator::RatingCalculator;
use crate::rating::storage::EntityStore;
use crate::types::{
    Attempt, AttemptOutcome, EntityId, EntityKey, Inactivity, Rated, RatedEntity,
};
use crate::utils::{current_timestamp, days_since};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Rates attempts against stored entities, one writer per entity
pub struct AttemptProcessor {
    store: Arc<dyn EntityStore>,
    calculator: Arc<dyn RatingCalculator>,
    locks: Mutex<HashMap<EntityKey, Arc<Mutex<()>>>>,
}

impl AttemptProcessor {
    pub fn new(store: Arc<dyn EntityStore>, calculator: Arc<dyn RatingCalculator>) -> Self {
        Self {
            store,
            calculator,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    /// Rate an attempt at the current time.
    ///
    /// The clock is read once both entity locks are held, so attempts on the
    /// same entity are stamped in the order they are applied.
    pub fn process(
        &self,
        player_id: &EntityId,
        puzzle_id: &EntityId,
        attempt: &Attempt,
    ) -> crate::error::Result<AttemptOutcome> {
        self.process_with_clock(player_id, puzzle_id, attempt, current_timestamp)
    }

    /// Rate an attempt made at `now`.
    ///
    /// Entities the store has never seen start from the calculator's initial
    /// rating. Both entities are written back together with their last
    /// interaction set to `now`; nothing is written if rating fails.
    pub fn process_at(
        &self,
        player_id: &EntityId,
        puzzle_id: &EntityId,
        attempt: &Attempt,
        now: DateTime<Utc>,
    ) -> crate::error::Result<AttemptOutcome> {
        self.process_with_clock(player_id, puzzle_id, attempt, move || now)
    }

    fn process_with_clock(
        &self,
        player_id: &EntityId,
        puzzle_id: &EntityId,
        attempt: &Attempt,
        clock: impl FnOnce() -> DateTime<Utc>,
    ) -> crate::error::Result<AttemptOutcome> {
        let player_key = EntityKey::player(player_id.clone());
        let puzzle_key = EntityKey::puzzle(puzzle_id.clone());

        let mut handles = [
            (player_key.clone(), self.lock_handle(&player_key)?),
            (puzzle_key.clone(), self.lock_handle(&puzzle_key)?),
        ];
        handles.sort_by(|a, b| a.0.cmp(&b.0));

        // Guards live only for the closure; handles are dropped before pruning
        let result = handles
            .iter()
            .map(|(_, handle)| acquire(handle))
            .collect::<crate::error::Result<Vec<_>>>()
            .and_then(|_guards| self.rate_locked(&player_key, &puzzle_key, attempt, clock()));

        drop(handles);
        self.prune_locks();
        result
    }

    fn rate_locked(
        &self,
        player_key: &EntityKey,
        puzzle_key: &EntityKey,
        attempt: &Attempt,
        now: DateTime<Utc>,
    ) -> crate::error::Result<AttemptOutcome> {
        let mut player = self.load_or_create(player_key)?;
        let mut puzzle = self.load_or_create(puzzle_key)?;

        let inactivity = Inactivity {
            player_days: days_since(player.last_interaction, now),
            puzzle_days: days_since(puzzle.last_interaction, now),
        };

        let outcome =
            self.calculator
                .rate_attempt(&player.state(), &puzzle.state(), attempt, inactivity)?;

        player.set_uncertainty(outcome.player.new.uncertainty);
        player.set_rating(outcome.player.new.rating);
        player.touch(now);
        puzzle.set_uncertainty(outcome.puzzle.new.uncertainty);
        puzzle.set_rating(outcome.puzzle.new.rating);
        puzzle.touch(now);

        self.store.store_entities(vec![player, puzzle])?;

        info!(
            player = %player_key,
            puzzle = %puzzle_key,
            correct = attempt.correct,
            player_rating = outcome.player.new.rating,
            puzzle_rating = outcome.puzzle.new.rating,
            "Processed attempt"
        );

        Ok(outcome)
    }

    fn load_or_create(&self, key: &EntityKey) -> crate::error::Result<RatedEntity> {
        if let Some(entity) = self.store.get_entity(key)? {
            return Ok(entity);
        }

        let initial = self.calculator.get_initial_rating();
        debug!(entity = %key, rating = initial.rating, "Creating entity with initial rating");
        Ok(RatedEntity::new(
            key.kind,
            key.id.clone(),
            initial.rating,
            initial.uncertainty,
        ))
    }

    fn lock_handle(&self, key: &EntityKey) -> crate::error::Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| RatingError::InternalError {
            message: "Failed to acquire entity lock table".to_string(),
        })?;
        Ok(locks.entry(key.clone()).or_default().clone())
    }

    /// Drop lock entries no caller is holding a handle to
    fn prune_locks(&self) {
        if let Ok(mut locks) = self.locks.lock() {
            locks.retain(|_, handle| Arc::strong_count(handle) > 1);
        }
    }
}

fn acquire(handle: &Mutex<()>) -> crate::error::Result<MutexGuard<'_, ()>> {
    handle.lock().map_err(|_| {
        RatingError::InternalError {
            message: "Failed to acquire entity lock".to_string(),
        }
        .into()
    })
}
