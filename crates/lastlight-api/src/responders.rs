//! `Responder` implementations, one per entry surface.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use lastlight_core::chat::ChatChannel;
use lastlight_core::error::GameError;
use lastlight_core::responder::Responder;

/// Buffers replies so an HTTP handler can return them in its response body.
#[derive(Debug, Default)]
pub struct HttpResponder {
    replies: Mutex<Vec<String>>,
}

impl HttpResponder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every reply buffered so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.replies.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn push(&self, text: &str) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_owned());
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn send_message(&self, text: &str) -> Result<(), GameError> {
        self.push(text);
        Ok(())
    }

    // The HTTP request stays open until the handler returns.
    async fn defer(&self) -> Result<(), GameError> {
        Ok(())
    }

    async fn send_followup(&self, text: &str) -> Result<(), GameError> {
        self.push(text);
        Ok(())
    }
}

/// Replies to chat-text commands by posting into the game channel.
#[derive(Clone)]
pub struct ChatResponder {
    channel: Arc<dyn ChatChannel>,
}

impl std::fmt::Debug for ChatResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatResponder").finish_non_exhaustive()
    }
}

impl ChatResponder {
    #[must_use]
    pub fn new(channel: Arc<dyn ChatChannel>) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl Responder for ChatResponder {
    async fn send_message(&self, text: &str) -> Result<(), GameError> {
        self.channel.send_message(text).await.map(|_| ())
    }

    // Chat messages carry no reply deadline.
    async fn defer(&self) -> Result<(), GameError> {
        Ok(())
    }

    async fn send_followup(&self, text: &str) -> Result<(), GameError> {
        self.channel.send_message(text).await.map(|_| ())
    }
}
