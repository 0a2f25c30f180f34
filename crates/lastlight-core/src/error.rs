//! Game error types.

use thiserror::Error;

/// Top-level error type shared by the round engine and its collaborators.
///
/// Generation absence is deliberately not represented here: the generation
/// client reports it as `None`, and the round engine turns it into a terminal
/// game ending rather than an error value.
#[derive(Debug, Error)]
pub enum GameError {
    /// A game is already running; only one may be active at a time.
    #[error("a game is already in progress (round {round})")]
    AlreadyActive {
        /// Round the active game is on.
        round: u32,
    },

    /// An operation required an active game but none is running.
    #[error("no game is currently active")]
    NoActiveGame,

    /// A resume was requested but no snapshot has been saved.
    #[error("no saved game to resume")]
    SnapshotNotFound,

    /// A snapshot could not be read, written or decoded.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The chat platform rejected or failed a delivery.
    #[error("chat platform error: {0}")]
    Platform(String),

    /// Invalid input from a caller.
    #[error("validation error: {0}")]
    Validation(String),
}
