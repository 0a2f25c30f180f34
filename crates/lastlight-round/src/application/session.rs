//! Active game sessions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lastlight_core::error::GameError;
use tracing::info;
use uuid::Uuid;

use crate::domain::speed::Speed;
use crate::domain::state::GameState;
use crate::domain::summary::GameSummary;

/// Handle to one running game.
///
/// The round engine is the only writer of the state during a round; other
/// callers read copies or flip the termination flag, which the engine checks
/// between phases.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    state: Mutex<GameState>,
    terminate: AtomicBool,
}

impl GameSession {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            id: state.game_id,
            state: Mutex::new(state),
            terminate: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        // State updates are single assignments; a poisoned lock is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.lock().clone()
    }

    /// Runs `f` with exclusive access to the state.
    pub fn update<R>(&self, f: impl FnOnce(&mut GameState) -> R) -> R {
        f(&mut self.lock())
    }

    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary::from(&*self.lock())
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.lock().round_number
    }

    #[must_use]
    pub fn speed(&self) -> Speed {
        self.lock().current_speed
    }

    /// Asks the engine to stop at the next phase boundary.
    pub fn request_termination(&self) {
        self.terminate.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminate.load(Ordering::SeqCst)
    }
}

/// Holds the single active session, if any.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    active: Mutex<Option<Arc<GameSession>>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<GameSession>>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new session for `state`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::AlreadyActive` if another session is registered.
    pub fn register(&self, state: GameState) -> Result<Arc<GameSession>, GameError> {
        let mut slot = self.slot();
        if let Some(active) = slot.as_ref() {
            return Err(GameError::AlreadyActive {
                round: active.round_number(),
            });
        }
        let session = Arc::new(GameSession::new(state));
        info!(game_id = %session.id(), "game session registered");
        *slot = Some(Arc::clone(&session));
        Ok(session)
    }

    /// The active session.
    #[must_use]
    pub fn current(&self) -> Option<Arc<GameSession>> {
        self.slot().clone()
    }

    /// Clears the slot if it still holds the game `game_id`. Returns whether
    /// anything was released.
    pub fn release(&self, game_id: Uuid) -> bool {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|s| s.id() == game_id) {
            *slot = None;
            info!(%game_id, "game session released");
            true
        } else {
            false
        }
    }
}
