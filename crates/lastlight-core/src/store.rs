//! Snapshot persistence abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GameError;

/// A serialized snapshot as held by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    /// Record name; a deployment keeps a single named record.
    pub name: String,
    /// Serialized game state.
    pub payload: serde_json::Value,
    /// When the record was last written.
    pub saved_at: DateTime<Utc>,
}

/// Store holding named, fully overwritten snapshot records.
///
/// Writes are last-write-wins; there is no history and no transaction.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the named record, or `None` if it has never been written.
    async fn load(&self, name: &str) -> Result<Option<StoredSnapshot>, GameError>;

    /// Overwrites the named record.
    async fn save(&self, snapshot: &StoredSnapshot) -> Result<(), GameError>;
}
