//! Test snapshot stores — mock `SnapshotStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use lastlight_core::error::GameError;
use lastlight_core::store::{SnapshotStore, StoredSnapshot};

/// A snapshot store backed by a map. Counts saves so tests can assert that
/// a round was persisted.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    records: Mutex<HashMap<String, StoredSnapshot>>,
    saves: Mutex<usize>,
}

impl InMemorySnapshotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `snapshot`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_snapshot(snapshot: StoredSnapshot) -> Self {
        let store = Self::new();
        store
            .records
            .lock()
            .unwrap()
            .insert(snapshot.name.clone(), snapshot);
        store
    }

    /// The record stored under `name`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn get(&self, name: &str) -> Option<StoredSnapshot> {
        self.records.lock().unwrap().get(name).cloned()
    }

    /// Number of successful saves.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self, name: &str) -> Result<Option<StoredSnapshot>, GameError> {
        Ok(self.records.lock().unwrap().get(name).cloned())
    }

    async fn save(&self, snapshot: &StoredSnapshot) -> Result<(), GameError> {
        self.records
            .lock()
            .unwrap()
            .insert(snapshot.name.clone(), snapshot.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// A snapshot store that always returns a persistence error. Useful for
/// testing that persistence failures never end a game.
#[derive(Debug)]
pub struct FailingSnapshotStore;

#[async_trait]
impl SnapshotStore for FailingSnapshotStore {
    async fn load(&self, _name: &str) -> Result<Option<StoredSnapshot>, GameError> {
        Err(GameError::Persistence("disk unavailable".into()))
    }

    async fn save(&self, _snapshot: &StoredSnapshot) -> Result<(), GameError> {
        Err(GameError::Persistence("disk unavailable".into()))
    }
}
