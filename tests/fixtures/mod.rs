//! Test fixtures and mock implementations for integration testing

use riddle_rating::error::Result;
use riddle_rating::rating::{EntityStore, InMemoryEntityStore};
use riddle_rating::types::{EntityKey, EntityKind, RatedEntity};
use std::sync::{Arc, Mutex};

/// Entity store that records every write for later inspection
#[derive(Debug, Default)]
pub struct RecordingEntityStore {
    inner: InMemoryEntityStore,
    writes: Arc<Mutex<Vec<RatedEntity>>>,
}

impl RecordingEntityStore {
    /// Seed entities without recording them as writes
    pub fn seeded(entities: impl IntoIterator<Item = RatedEntity>) -> Self {
        Self {
            inner: InMemoryEntityStore::with_entities(entities),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All entities written so far, in order
    pub fn get_writes(&self) -> Vec<RatedEntity> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }

    /// Count writes for one entity kind
    pub fn count_writes_of_kind(&self, kind: EntityKind) -> usize {
        self.get_writes().iter().filter(|e| e.kind == kind).count()
    }
}

impl EntityStore for RecordingEntityStore {
    fn get_entity(&self, key: &EntityKey) -> Result<Option<RatedEntity>> {
        self.inner.get_entity(key)
    }

    fn store_entity(&self, entity: RatedEntity) -> Result<()> {
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(entity.clone());
        }
        self.inner.store_entity(entity)
    }

    fn store_entities(&self, entities: Vec<RatedEntity>) -> Result<()> {
        if let Ok(mut writes) = self.writes.lock() {
            writes.extend(entities.iter().cloned());
        }
        self.inner.store_entities(entities)
    }
}

/// A small pool of landmark puzzles at spread difficulties
pub fn landmark_pool() -> Vec<RatedEntity> {
    vec![
        RatedEntity::puzzle("clock_tower", 8.0, 0.3),
        RatedEntity::puzzle("old_bridge", 10.0, 0.3),
        RatedEntity::puzzle("cathedral", 12.0, 0.3),
    ]
}
