//! Shared application state.

use std::sync::Arc;

use lastlight_core::chat::{ChatChannel, ReactionEvent};
use lastlight_core::store::SnapshotStore;
use lastlight_roster::Roster;
use lastlight_round::application::engine::RoundEngine;
use lastlight_round::application::session::SessionRegistry;
use tokio::sync::broadcast;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide round engine.
    pub engine: Arc<RoundEngine>,
    /// Holds the single active game.
    pub registry: Arc<SessionRegistry>,
    /// Chat channel the game is played in; chat-text commands reply here.
    pub channel: Arc<dyn ChatChannel>,
    /// Inbound reaction events are published here for vote collection.
    pub reactions: broadcast::Sender<ReactionEvent>,
    /// Character catalog new games are built from.
    pub roster: &'static Roster,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        engine: Arc<RoundEngine>,
        channel: Arc<dyn ChatChannel>,
        reactions: broadcast::Sender<ReactionEvent>,
        roster: &'static Roster,
    ) -> Self {
        Self {
            engine,
            registry: Arc::new(SessionRegistry::new()),
            channel,
            reactions,
            roster,
        }
    }

    /// Snapshot store the engine persists to.
    #[must_use]
    pub fn store(&self) -> &dyn SnapshotStore {
        self.engine.store().as_ref()
    }
}
