//! Query handlers for the round engine.

use lastlight_core::error::GameError;
use lastlight_core::store::SnapshotStore;
use serde::Serialize;

use crate::application::session::SessionRegistry;
use crate::application::snapshots::load_snapshot;
use crate::domain::summary::GameSummary;

/// Whether a resumable game is saved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotStatus {
    /// Whether a resumable snapshot is stored.
    pub exists: bool,
    /// The round the snapshot would resume at.
    pub round_number: Option<u32>,
    /// How many characters are alive in it.
    pub alive: Option<usize>,
}

/// Summary of the active game.
///
/// # Errors
///
/// Returns `GameError::NoActiveGame` if nothing is running.
pub fn get_current_game(registry: &SessionRegistry) -> Result<GameSummary, GameError> {
    registry
        .current()
        .map(|session| session.summary())
        .ok_or(GameError::NoActiveGame)
}

/// Describes the saved snapshot, if any. Unreadable snapshots count as
/// absent.
pub async fn get_snapshot_status(store: &dyn SnapshotStore) -> SnapshotStatus {
    match load_snapshot(store).await {
        Some(state) => SnapshotStatus {
            exists: true,
            round_number: Some(state.round_number),
            alive: Some(state.alive.len()),
        },
        None => SnapshotStatus {
            exists: false,
            round_number: None,
            alive: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lastlight_roster::Roster;
    use lastlight_test_support::{FailingSnapshotStore, FixedClock, InMemorySnapshotStore};
    use uuid::Uuid;

    use super::*;
    use crate::application::snapshots::save_snapshot;
    use crate::domain::state::GameState;

    #[test]
    fn test_current_game_requires_active_session() {
        let registry = SessionRegistry::new();

        assert!(matches!(get_current_game(&registry), Err(GameError::NoActiveGame)));

        registry
            .register(GameState::new(Uuid::nil(), "alice", Roster::standard()))
            .unwrap();
        let summary = get_current_game(&registry).unwrap();
        assert_eq!(summary.game_id, Uuid::nil());
    }

    #[tokio::test]
    async fn test_snapshot_status_reports_saved_round() {
        let store = InMemorySnapshotStore::new();
        let mut state = GameState::new(Uuid::nil(), "alice", Roster::standard());
        state.round_number = 7;
        save_snapshot(
            &store,
            &FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()),
            &state,
        )
        .await;

        let status = get_snapshot_status(&store).await;

        assert!(status.exists);
        assert_eq!(status.round_number, Some(7));
        assert_eq!(status.alive, Some(Roster::standard().characters().len()));
    }

    #[tokio::test]
    async fn test_failing_store_reports_absent() {
        let status = get_snapshot_status(&FailingSnapshotStore).await;

        assert!(!status.exists);
    }
}
