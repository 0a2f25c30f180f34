//! Command handlers for the round engine.
//!
//! Handlers reply through a [`Responder`], so the same code serves every
//! entry surface. Reply delivery failures are logged and never change the
//! outcome of a command.

use std::sync::Arc;

use lastlight_core::error::GameError;
use lastlight_core::responder::Responder;
use lastlight_core::store::SnapshotStore;
use lastlight_roster::Roster;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::engine::RoundEngine;
use crate::application::session::{GameSession, SessionRegistry};
use crate::application::snapshots::load_snapshot;
use crate::domain::commands::{SetSpeed, StartGame, TerminateGame};
use crate::domain::phase::GameEnd;
use crate::domain::speed::Speed;
use crate::domain::state::GameState;

async fn reply(responder: &dyn Responder, text: &str) {
    if let Err(err) = responder.send_followup(text).await {
        warn!(error = %err, "failed to deliver command reply");
    }
}

/// Handles `StartGame`: builds a fresh state or loads the saved one and
/// registers it as the active session.
///
/// # Errors
///
/// Returns `GameError::AlreadyActive` if a game is running,
/// `GameError::SnapshotNotFound` if a resume finds nothing to load, and
/// `GameError::Validation` if the saved game is finished or inconsistent.
#[instrument(skip_all, fields(initiator = %command.initiator, resume = command.resume))]
pub async fn handle_start_game(
    command: &StartGame,
    registry: &SessionRegistry,
    store: &dyn SnapshotStore,
    roster: &Roster,
    responder: &dyn Responder,
) -> Result<Arc<GameSession>, GameError> {
    if let Err(err) = responder.defer().await {
        warn!(error = %err, "failed to defer command reply");
    }

    if let Some(active) = registry.current() {
        let err = GameError::AlreadyActive {
            round: active.round_number(),
        };
        reply(responder, &format!("⛔ {err}.")).await;
        return Err(err);
    }

    let state = if command.resume {
        let Some(mut state) = load_snapshot(store).await else {
            reply(responder, "⛔ There is no saved game to resume.").await;
            return Err(GameError::SnapshotNotFound);
        };
        if let Err(err) = state.validate(roster) {
            reply(responder, "⛔ The saved game is damaged and cannot be resumed.").await;
            return Err(err);
        }
        if state.is_over() {
            reply(responder, "⛔ The saved game has already ended.").await;
            return Err(GameError::Validation("saved game already ended".into()));
        }
        state.terminated = false;
        state
    } else {
        GameState::new(Uuid::now_v7(), command.initiator.clone(), roster)
    };

    let session = match registry.register(state) {
        Ok(session) => session,
        Err(err) => {
            reply(responder, &format!("⛔ {err}.")).await;
            return Err(err);
        }
    };

    let summary = session.summary();
    let text = if command.resume {
        format!(
            "🌒 Resuming at round {} with {} survivors.",
            summary.round_number,
            summary.alive.len()
        )
    } else {
        format!(
            "🌒 A new game begins, started by {}. {} survivors remain.",
            summary.initiator,
            summary.alive.len()
        )
    };
    reply(responder, &text).await;
    info!(game_id = %session.id(), round = summary.round_number, "game registered");
    Ok(session)
}

/// Runs `session` on a background task and releases it from the registry
/// when it ends.
pub fn spawn_game(
    engine: Arc<RoundEngine>,
    registry: Arc<SessionRegistry>,
    session: Arc<GameSession>,
) -> JoinHandle<GameEnd> {
    tokio::spawn(async move {
        let end = engine.run(&session).await;
        registry.release(session.id());
        end
    })
}

/// Handles `TerminateGame`: flags the active game to stop at the next phase
/// boundary.
///
/// # Errors
///
/// Returns `GameError::NoActiveGame` if nothing is running.
#[instrument(skip_all, fields(requested_by = %command.requested_by))]
pub fn handle_terminate_game(
    command: &TerminateGame,
    registry: &SessionRegistry,
) -> Result<Uuid, GameError> {
    let session = registry.current().ok_or(GameError::NoActiveGame)?;
    session.request_termination();
    info!(game_id = %session.id(), "termination requested");
    Ok(session.id())
}

/// Handles `SetSpeed`: changes the pacing of the active game.
///
/// # Errors
///
/// Returns `GameError::NoActiveGame` if nothing is running.
#[instrument(skip_all, fields(multiplier = command.multiplier))]
pub fn handle_set_speed(command: &SetSpeed, registry: &SessionRegistry) -> Result<Speed, GameError> {
    let session = registry.current().ok_or(GameError::NoActiveGame)?;
    let speed = session.update(|state| state.set_speed(command.multiplier));
    info!(game_id = %session.id(), %speed, "speed changed");
    Ok(speed)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use lastlight_core::chat::ReactionCounts;
    use lastlight_core::clock::Clock;
    use lastlight_narrative::HeuristicInterpreter;
    use lastlight_test_support::{
        FixedClock, InMemorySnapshotStore, MockRng, RecordingChannel, RecordingResponder, Reply,
        ScriptedGenerator,
    };
    use lastlight_voting::VoteAggregator;

    use super::*;
    use crate::application::snapshots::save_snapshot;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn start(resume: bool) -> StartGame {
        StartGame {
            initiator: "alice".into(),
            resume,
        }
    }

    #[tokio::test]
    async fn test_start_fresh_registers_full_roster() {
        // Arrange
        let registry = SessionRegistry::new();
        let store = InMemorySnapshotStore::new();
        let responder = RecordingResponder::new();

        // Act
        let session = handle_start_game(&start(false), &registry, &store, Roster::standard(), &responder)
            .await
            .unwrap();

        // Assert
        assert_eq!(session.state().alive, Roster::standard().names());
        assert_eq!(session.state().initiator, "alice");
        assert!(registry.current().is_some());
        let replies = responder.replies();
        assert_eq!(replies[0], Reply::Deferred);
        assert!(responder.texts()[0].contains("started by alice"));
    }

    #[tokio::test]
    async fn test_start_while_active_is_rejected() {
        let registry = SessionRegistry::new();
        let store = InMemorySnapshotStore::new();
        let responder = RecordingResponder::new();
        handle_start_game(&start(false), &registry, &store, Roster::standard(), &responder)
            .await
            .unwrap();

        let second =
            handle_start_game(&start(false), &registry, &store, Roster::standard(), &responder).await;

        assert!(matches!(second, Err(GameError::AlreadyActive { round: 1 })));
        assert!(responder.texts().last().unwrap().contains("already in progress"));
    }

    #[tokio::test]
    async fn test_resume_without_snapshot_is_not_found() {
        let registry = SessionRegistry::new();
        let responder = RecordingResponder::new();

        let result = handle_start_game(
            &start(true),
            &registry,
            &InMemorySnapshotStore::new(),
            Roster::standard(),
            &responder,
        )
        .await;

        assert!(matches!(result, Err(GameError::SnapshotNotFound)));
        assert!(registry.current().is_none());
        assert_eq!(responder.texts(), vec!["⛔ There is no saved game to resume."]);
    }

    #[tokio::test]
    async fn test_resume_rehydrates_saved_state() {
        // Arrange
        let store = InMemorySnapshotStore::new();
        let mut saved = GameState::new(Uuid::new_v4(), "bob", Roster::standard());
        saved.round_number = 5;
        saved.alive.retain(|n| n != "Jordan");
        saved.dead.push("Jordan".into());
        saved.terminated = true;
        save_snapshot(&store, &clock(), &saved).await;
        let registry = SessionRegistry::new();
        let responder = RecordingResponder::new();

        // Act
        let session = handle_start_game(&start(true), &registry, &store, Roster::standard(), &responder)
            .await
            .unwrap();

        // Assert
        let state = session.state();
        assert_eq!(state.game_id, saved.game_id);
        assert_eq!(state.round_number, 5);
        assert_eq!(state.dead, vec!["Jordan"]);
        assert!(!state.terminated);
        assert!(responder.texts()[0].contains("Resuming at round 5"));
    }

    #[tokio::test]
    async fn test_resume_of_finished_game_is_rejected() {
        let store = InMemorySnapshotStore::new();
        let mut saved = GameState::new(Uuid::new_v4(), "bob", Roster::standard());
        let last = saved.alive.split_off(1);
        saved.dead = last;
        save_snapshot(&store, &clock(), &saved).await;

        let result = handle_start_game(
            &start(true),
            &SessionRegistry::new(),
            &store,
            Roster::standard(),
            &RecordingResponder::new(),
        )
        .await;

        assert!(matches!(result, Err(GameError::Validation(_))));
    }

    #[test]
    fn test_terminate_and_speed_need_active_game() {
        let registry = SessionRegistry::new();

        let terminated = handle_terminate_game(
            &TerminateGame {
                requested_by: "alice".into(),
            },
            &registry,
        );
        let speed = handle_set_speed(&SetSpeed { multiplier: 2.0 }, &registry);

        assert!(matches!(terminated, Err(GameError::NoActiveGame)));
        assert!(matches!(speed, Err(GameError::NoActiveGame)));
    }

    #[test]
    fn test_set_speed_normalizes_and_terminate_flags_session() {
        let registry = SessionRegistry::new();
        let session = registry
            .register(GameState::new(Uuid::new_v4(), "alice", Roster::standard()))
            .unwrap();

        let fast = handle_set_speed(&SetSpeed { multiplier: 1.5 }, &registry).unwrap();
        let odd = handle_set_speed(&SetSpeed { multiplier: 3.3 }, &registry).unwrap();
        let id = handle_terminate_game(
            &TerminateGame {
                requested_by: "alice".into(),
            },
            &registry,
        )
        .unwrap();

        assert_eq!(fast, Speed::Fast);
        assert_eq!(odd, Speed::Normal);
        assert_eq!(session.speed(), Speed::Normal);
        assert_eq!(id, session.id());
        assert!(session.is_terminated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_game_releases_registry() {
        // Arrange
        let registry = Arc::new(SessionRegistry::new());
        let mut state = GameState::new(Uuid::new_v4(), "alice", Roster::standard());
        state.alive = vec!["Jordan".into(), "Ella Muy".into()];
        let session = registry.register(state).unwrap();
        let clock: Arc<dyn Clock> = Arc::new(clock());
        let engine = Arc::new(
            RoundEngine::new(
                Arc::new(ScriptedGenerator::succeeding([
                    "Jordan waits.",
                    "Jordan: fine",
                    "- Cold",
                    "1. Go\n2. Stay",
                    "Deaths: Jordan",
                ])),
                Arc::new(HeuristicInterpreter::standard()),
                Arc::new(RecordingChannel::with_counts(ReactionCounts::new(1, 0))),
                Arc::new(InMemorySnapshotStore::new()),
                clock,
                Box::new(MockRng),
            )
            .with_votes(VoteAggregator::new(
                Duration::ZERO,
                Duration::from_millis(50),
                Duration::from_secs(1),
            ))
            .with_phase_delay(Duration::ZERO),
        );

        // Act
        let end = spawn_game(engine, Arc::clone(&registry), session).await.unwrap();

        // Assert
        assert_eq!(
            end,
            GameEnd::Victory {
                survivor: "Ella Muy".into()
            }
        );
        assert!(registry.current().is_none());
    }
}
