//! Entity storage interface and an in-memory implementation
//!
//! Persistence strategy is left to the host application; the engine only needs
//! to load and save a [`RatedEntity`] by key.

use crate::error::RatingError;
use crate::types::{EntityKey, RatedEntity};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Trait for entity storage operations
pub trait EntityStore: Send + Sync {
    /// Get an entity by key
    fn get_entity(&self, key: &EntityKey) -> crate::error::Result<Option<RatedEntity>>;

    /// Store or replace an entity
    fn store_entity(&self, entity: RatedEntity) -> crate::error::Result<()>;

    /// Store several entities in one write
    fn store_entities(&self, entities: Vec<RatedEntity>) -> crate::error::Result<()>;
}

/// In-memory entity storage
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    entities: RwLock<HashMap<EntityKey, RatedEntity>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with entities
    pub fn with_entities(entities: impl IntoIterator<Item = RatedEntity>) -> Self {
        let map = entities.into_iter().map(|e| (e.key(), e)).collect();
        Self {
            entities: RwLock::new(map),
        }
    }

    fn read(&self) -> crate::error::Result<RwLockReadGuard<'_, HashMap<EntityKey, RatedEntity>>> {
        self.entities.read().map_err(|_| {
            RatingError::InternalError {
                message: "Failed to acquire entities read lock".to_string(),
            }
            .into()
        })
    }

    fn write(
        &self,
    ) -> crate::error::Result<RwLockWriteGuard<'_, HashMap<EntityKey, RatedEntity>>> {
        self.entities.write().map_err(|_| {
            RatingError::InternalError {
                message: "Failed to acquire entities write lock".to_string(),
            }
            .into()
        })
    }
}

impl EntityStore for InMemoryEntityStore {
    fn get_entity(&self, key: &EntityKey) -> crate::error::Result<Option<RatedEntity>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn store_entity(&self, entity: RatedEntity) -> crate::error::Result<()> {
        self.write()?.insert(entity.key(), entity);
        Ok(())
    }

    fn store_entities(&self, entities: Vec<RatedEntity>) -> crate::error::Result<()> {
        let mut stored = self.write()?;
        for entity in entities {
            stored.insert(entity.key(), entity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let store = InMemoryEntityStore::new();
        store
            .store_entity(RatedEntity::player("alice", 11.0, 0.4))
            .unwrap();

        let alice = store.get_entity(&EntityKey::player("alice")).unwrap();
        assert_eq!(alice.map(|e| e.rating), Some(11.0));

        // Same id under the other kind is a different entity
        assert!(store
            .get_entity(&EntityKey::puzzle("alice"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_store_entities_replaces_existing() {
        let store = InMemoryEntityStore::with_entities([RatedEntity::player("p1", 10.0, 0.5)]);
        store
            .store_entities(vec![
                RatedEntity::player("p1", 10.4, 0.475),
                RatedEntity::puzzle("z1", 12.0, 0.5),
            ])
            .unwrap();

        let p1 = store.get_entity(&EntityKey::player("p1")).unwrap().unwrap();
        assert_eq!(p1.rating, 10.4);
        assert!(store
            .get_entity(&EntityKey::puzzle("z1"))
            .unwrap()
            .is_some());
        assert!(store
            .get_entity(&EntityKey::puzzle("missing"))
            .unwrap()
            .is_none());
    }
}
