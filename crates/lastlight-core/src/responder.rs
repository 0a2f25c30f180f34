//! Command responder interface.
//!
//! A game can be started from more than one entry surface. Each surface
//! implements this trait once so command handling code is written a single
//! time against it.

use async_trait::async_trait;

use crate::error::GameError;

/// Replies to whoever issued a command.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Sends an immediate reply.
    async fn send_message(&self, text: &str) -> Result<(), GameError>;

    /// Acknowledges the command without a visible reply, buying time for
    /// slow work. Surfaces without a deadline may treat this as a no-op.
    async fn defer(&self) -> Result<(), GameError>;

    /// Sends a reply after `defer`.
    async fn send_followup(&self, text: &str) -> Result<(), GameError>;
}
