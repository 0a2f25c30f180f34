//! Chat platform collaborator interface.
//!
//! The round engine only needs to post and edit plain text, attach the two
//! vote reactions to a message, read their counts, and hear about reaction
//! changes. Rendering is the adapter's business.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::GameError;

/// Platform identifier of a posted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One of the two mutually exclusive vote options of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    /// Choice number one.
    First,
    /// Choice number two.
    Second,
}

impl VoteOption {
    /// Both options, in ballot order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// The reaction emoji used for this option.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::First => "1\u{fe0f}\u{20e3}",
            Self::Second => "2\u{fe0f}\u{20e3}",
        }
    }

    /// Maps a reaction emoji back to an option.
    #[must_use]
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.emoji() == emoji)
    }

    /// Zero-based ballot position.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Whether a reaction was placed or withdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionChange {
    /// A user added a reaction.
    Added,
    /// A user removed a reaction.
    Removed,
}

/// Notification that the reactions on a message changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// Message the reaction belongs to.
    pub message_id: MessageId,
    /// Raw emoji of the reaction.
    pub emoji: String,
    /// Added or removed.
    pub change: ReactionChange,
}

/// Per-option reaction counts, excluding the engine's own reactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    /// Votes for option one.
    pub first: u32,
    /// Votes for option two.
    pub second: u32,
}

impl ReactionCounts {
    /// Creates counts from explicit values.
    #[must_use]
    pub fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    /// Count for a single option.
    #[must_use]
    pub fn get(&self, option: VoteOption) -> u32 {
        match option {
            VoteOption::First => self.first,
            VoteOption::Second => self.second,
        }
    }

    /// Total votes cast.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.first + self.second
    }
}

/// A text channel on the chat platform.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Posts a plain-text message and returns its identifier.
    async fn send_message(&self, text: &str) -> Result<MessageId, GameError>;

    /// Replaces the content of a previously posted message.
    async fn edit_message(&self, message: &MessageId, text: &str) -> Result<(), GameError>;

    /// Attaches a reaction to a message as the engine.
    async fn add_reaction(&self, message: &MessageId, emoji: &str) -> Result<(), GameError>;

    /// Reads the current vote counts on a message, not counting the engine's
    /// own reactions.
    async fn reaction_counts(&self, message: &MessageId) -> Result<ReactionCounts, GameError>;

    /// Subscribes to reaction change notifications for this channel.
    fn subscribe_reactions(&self) -> broadcast::Receiver<ReactionEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_round_trips_to_option() {
        for option in VoteOption::ALL {
            assert_eq!(VoteOption::from_emoji(option.emoji()), Some(option));
        }
        assert_eq!(VoteOption::from_emoji("👍"), None);
    }

    #[test]
    fn test_counts_total_and_lookup() {
        let counts = ReactionCounts::new(3, 1);

        assert_eq!(counts.get(VoteOption::First), 3);
        assert_eq!(counts.get(VoteOption::Second), 1);
        assert_eq!(counts.total(), 4);
    }
}
