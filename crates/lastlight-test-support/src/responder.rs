//! Recording responder — captures command replies for assertions.

use std::sync::Mutex;

use async_trait::async_trait;
use lastlight_core::error::GameError;
use lastlight_core::responder::Responder;

/// One call made on a responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Deferred,
    Followup(String),
}

/// A responder that records every call and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingResponder {
    replies: Mutex<Vec<Reply>>,
}

impl RecordingResponder {
    /// Create an empty responder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every reply recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }

    /// Texts of messages and followups, ignoring defers.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn texts(&self) -> Vec<String> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| match r {
                Reply::Message(t) | Reply::Followup(t) => Some(t.clone()),
                Reply::Deferred => None,
            })
            .collect()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn send_message(&self, text: &str) -> Result<(), GameError> {
        self.replies
            .lock()
            .unwrap()
            .push(Reply::Message(text.to_owned()));
        Ok(())
    }

    async fn defer(&self) -> Result<(), GameError> {
        self.replies.lock().unwrap().push(Reply::Deferred);
        Ok(())
    }

    async fn send_followup(&self, text: &str) -> Result<(), GameError> {
        self.replies
            .lock()
            .unwrap()
            .push(Reply::Followup(text.to_owned()));
        Ok(())
    }
}
