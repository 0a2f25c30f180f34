//! Recording chat channel — in-memory `ChatChannel` for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use lastlight_core::chat::{
    ChatChannel, MessageId, ReactionChange, ReactionCounts, ReactionEvent, VoteOption,
};
use lastlight_core::error::GameError;
use tokio::sync::broadcast;

/// A chat channel that records everything posted to it. Reaction counts are
/// set by the test and reaction events are injected with [`Self::react`].
#[derive(Debug)]
pub struct RecordingChannel {
    sent: Mutex<Vec<(MessageId, String)>>,
    edits: Mutex<Vec<(MessageId, String)>>,
    reactions: Mutex<Vec<(MessageId, String)>>,
    counts: Mutex<ReactionCounts>,
    next_id: AtomicU64,
    fail_delivery: AtomicBool,
    fail_counts: AtomicBool,
    events: broadcast::Sender<ReactionEvent>,
}

impl Default for RecordingChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingChannel {
    /// Create an empty channel with zero reaction counts.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            sent: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            reactions: Mutex::new(Vec::new()),
            counts: Mutex::new(ReactionCounts::default()),
            next_id: AtomicU64::new(1),
            fail_delivery: AtomicBool::new(false),
            fail_counts: AtomicBool::new(false),
            events,
        }
    }

    /// Create a channel whose every message reports `counts`.
    #[must_use]
    pub fn with_counts(counts: ReactionCounts) -> Self {
        let channel = Self::new();
        channel.set_counts(counts);
        channel
    }

    /// Sets the counts returned by `reaction_counts`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn set_counts(&self, counts: ReactionCounts) {
        *self.counts.lock().unwrap() = counts;
    }

    /// Makes sends, edits and reactions fail with a platform error.
    pub fn fail_delivery(&self, fail: bool) {
        self.fail_delivery.store(fail, Ordering::SeqCst);
    }

    /// Makes `reaction_counts` fail with a platform error.
    pub fn fail_counts(&self, fail: bool) {
        self.fail_counts.store(fail, Ordering::SeqCst);
    }

    /// Broadcasts a reaction event for `message`.
    pub fn react(&self, message: &MessageId, option: VoteOption, change: ReactionChange) {
        // No subscribers is fine; the event is simply dropped.
        let _ = self.events.send(ReactionEvent {
            message_id: message.clone(),
            emoji: option.emoji().to_owned(),
            change,
        });
    }

    /// Texts of every message sent, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Identifier of the most recently sent message.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_message_id(&self) -> Option<MessageId> {
        self.sent.lock().unwrap().last().map(|(id, _)| id.clone())
    }

    /// Every edit, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn edits(&self) -> Vec<(MessageId, String)> {
        self.edits.lock().unwrap().clone()
    }

    /// Every reaction the engine attached, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn reactions(&self) -> Vec<(MessageId, String)> {
        self.reactions.lock().unwrap().clone()
    }

    fn check_delivery(&self) -> Result<(), GameError> {
        if self.fail_delivery.load(Ordering::SeqCst) {
            Err(GameError::Platform("missing permissions".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChatChannel for RecordingChannel {
    async fn send_message(&self, text: &str) -> Result<MessageId, GameError> {
        self.check_delivery()?;
        let id = MessageId(format!("m-{}", self.next_id.fetch_add(1, Ordering::SeqCst)));
        self.sent.lock().unwrap().push((id.clone(), text.to_owned()));
        Ok(id)
    }

    async fn edit_message(&self, message: &MessageId, text: &str) -> Result<(), GameError> {
        self.check_delivery()?;
        self.edits
            .lock()
            .unwrap()
            .push((message.clone(), text.to_owned()));
        Ok(())
    }

    async fn add_reaction(&self, message: &MessageId, emoji: &str) -> Result<(), GameError> {
        self.check_delivery()?;
        self.reactions
            .lock()
            .unwrap()
            .push((message.clone(), emoji.to_owned()));
        Ok(())
    }

    async fn reaction_counts(&self, _message: &MessageId) -> Result<ReactionCounts, GameError> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(GameError::Platform("reactions unavailable".into()));
        }
        Ok(*self.counts.lock().unwrap())
    }

    fn subscribe_reactions(&self) -> broadcast::Receiver<ReactionEvent> {
        self.events.subscribe()
    }
}
