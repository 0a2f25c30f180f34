//! Reaction vote sessions.

use std::time::Duration;

use lastlight_core::chat::{ChatChannel, MessageId, ReactionCounts, VoteOption};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Instant, sleep_until, timeout_at};
use tracing::{debug, info, instrument, warn};

/// Default wait between posting the reactions and reading the baseline.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(1);
/// Default quiet period that closes a session early.
pub const DEFAULT_INACTIVITY: Duration = Duration::from_secs(5);
/// Default hard limit on a whole session.
pub const DEFAULT_CEILING: Duration = Duration::from_secs(30);

/// Collects two-option reaction votes on a message.
///
/// A session ends when no reaction change arrives for `inactivity`, or when
/// `ceiling` has passed since it began, whichever comes first. Counts are
/// always re-read from the platform, so retractions are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteAggregator {
    settle: Duration,
    inactivity: Duration,
    ceiling: Duration,
}

impl Default for VoteAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE, DEFAULT_INACTIVITY, DEFAULT_CEILING)
    }
}

impl VoteAggregator {
    #[must_use]
    pub fn new(settle: Duration, inactivity: Duration, ceiling: Duration) -> Self {
        Self {
            settle,
            inactivity,
            ceiling,
        }
    }

    /// Runs a vote session on `message` and returns the final tallies.
    ///
    /// Platform failures are logged; the last counts read successfully are
    /// kept (zero if none ever were).
    #[instrument(skip(self, channel), fields(message = %message))]
    pub async fn collect(&self, channel: &dyn ChatChannel, message: &MessageId) -> ReactionCounts {
        let started = Instant::now();
        let hard_deadline = started + self.ceiling;

        // Subscribe before reacting so no early vote is missed.
        let mut events = channel.subscribe_reactions();

        for option in VoteOption::ALL {
            if let Err(err) = channel.add_reaction(message, option.emoji()).await {
                warn!(error = %err, option = ?option, "failed to attach vote reaction");
            }
        }

        sleep_until((started + self.settle).min(hard_deadline)).await;
        let mut counts = refresh(channel, message, ReactionCounts::default()).await;
        debug!(first = counts.first, second = counts.second, "baseline counts");

        let mut idle_deadline = Instant::now() + self.inactivity;
        loop {
            match timeout_at(idle_deadline.min(hard_deadline), events.recv()).await {
                Err(_) => break,
                Ok(Ok(event)) => {
                    if event.message_id != *message {
                        continue;
                    }
                    counts = refresh(channel, message, counts).await;
                    idle_deadline = Instant::now() + self.inactivity;
                }
                Ok(Err(RecvError::Lagged(missed))) => {
                    debug!(missed, "reaction stream lagged; recounting");
                    counts = refresh(channel, message, counts).await;
                    idle_deadline = Instant::now() + self.inactivity;
                }
                Ok(Err(RecvError::Closed)) => {
                    warn!("reaction stream closed; ending vote early");
                    break;
                }
            }
        }

        info!(
            first = counts.first,
            second = counts.second,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "vote closed"
        );
        counts
    }
}

/// Re-reads the authoritative counts, keeping `last` on failure.
async fn refresh(
    channel: &dyn ChatChannel,
    message: &MessageId,
    last: ReactionCounts,
) -> ReactionCounts {
    match channel.reaction_counts(message).await {
        Ok(counts) => counts,
        Err(err) => {
            warn!(error = %err, "failed to read reaction counts; keeping last known");
            last
        }
    }
}
