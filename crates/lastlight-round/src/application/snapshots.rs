//! Snapshot persistence of the game state.
//!
//! A deployment keeps one named record, overwritten after every completed
//! round. Failures here never end a game: they are logged and the caller
//! carries on as if nothing had been saved.

use lastlight_core::clock::Clock;
use lastlight_core::store::{SnapshotStore, StoredSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::state::GameState;

/// Name of the single snapshot record.
pub const SNAPSHOT_NAME: &str = "lastlight_game_state";

/// Current payload format.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotPayload {
    version: u32,
    state: GameState,
}

/// Saves `state`, logging and swallowing any failure. Returns whether the
/// write succeeded.
pub async fn save_snapshot(store: &dyn SnapshotStore, clock: &dyn Clock, state: &GameState) -> bool {
    let payload = match serde_json::to_value(SnapshotPayload {
        version: SNAPSHOT_VERSION,
        state: state.clone(),
    }) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(game_id = %state.game_id, error = %err, "failed to serialize snapshot");
            return false;
        }
    };

    let snapshot = StoredSnapshot {
        name: SNAPSHOT_NAME.to_owned(),
        payload,
        saved_at: clock.now(),
    };

    match store.save(&snapshot).await {
        Ok(()) => {
            info!(game_id = %state.game_id, round = state.round_number, "snapshot saved");
            true
        }
        Err(err) => {
            warn!(game_id = %state.game_id, error = %err, "failed to save snapshot");
            false
        }
    }
}

/// Loads the saved state. Missing, unreadable and undecodable records all
/// come back as `None`; the latter two are logged.
pub async fn load_snapshot(store: &dyn SnapshotStore) -> Option<GameState> {
    let stored = match store.load(SNAPSHOT_NAME).await {
        Ok(Some(stored)) => stored,
        Ok(None) => return None,
        Err(err) => {
            warn!(error = %err, "failed to load snapshot");
            return None;
        }
    };

    match serde_json::from_value::<SnapshotPayload>(stored.payload) {
        Ok(payload) if payload.version == SNAPSHOT_VERSION => Some(payload.state),
        Ok(payload) => {
            warn!(version = payload.version, "unsupported snapshot version");
            None
        }
        Err(err) => {
            warn!(error = %err, "failed to decode snapshot");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lastlight_roster::Roster;
    use lastlight_test_support::{FailingSnapshotStore, FixedClock, InMemorySnapshotStore};
    use uuid::Uuid;

    use super::*;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_save_then_load_returns_state() {
        // Arrange
        let store = InMemorySnapshotStore::new();
        let mut state = GameState::new(Uuid::nil(), "alice", Roster::standard());
        state.round_number = 3;

        // Act
        let saved = save_snapshot(&store, &clock(), &state).await;
        let loaded = load_snapshot(&store).await;

        // Assert
        assert!(saved);
        assert_eq!(loaded, Some(state));
        let record = store.get(SNAPSHOT_NAME).unwrap();
        assert_eq!(record.saved_at, clock().0);
        assert_eq!(record.payload["version"], SNAPSHOT_VERSION);
    }

    #[tokio::test]
    async fn test_missing_record_is_none() {
        assert!(load_snapshot(&InMemorySnapshotStore::new()).await.is_none());
    }

    #[tokio::test]
    async fn test_store_failures_are_swallowed() {
        let state = GameState::new(Uuid::nil(), "alice", Roster::standard());

        assert!(!save_snapshot(&FailingSnapshotStore, &clock(), &state).await);
        assert!(load_snapshot(&FailingSnapshotStore).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_version_or_garbage_is_none() {
        let store = InMemorySnapshotStore::with_snapshot(StoredSnapshot {
            name: SNAPSHOT_NAME.to_owned(),
            payload: serde_json::json!({"version": 99, "state": {}}),
            saved_at: clock().0,
        });

        assert!(load_snapshot(&store).await.is_none());
    }
}
