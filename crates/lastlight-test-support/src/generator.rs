//! Scripted generation — canned `TextGenerator` and `CompletionTransport`
//! implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use lastlight_generation::request::ChatCompletionRequest;
use lastlight_generation::{
    CompletionTransport, Credential, GenerationRequest, TextGenerator, TransportError,
};

/// A generator that answers from a queue of replies, one per call, and
/// records every request. Returns `None` once the queue is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Option<String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    /// Create a generator that returns each reply in order.
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(Into::into)).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a generator that succeeds with every reply in order.
    #[must_use]
    pub fn succeeding<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(Some))
    }

    /// Queues more replies.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn push(&self, reply: Option<&str>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(reply.map(str::to_owned));
    }

    /// Returns every request received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of replies not yet consumed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Option<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop_front().flatten()
    }
}

/// A transport that answers from a single queue regardless of credential
/// and records the label of each credential it was called with.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    /// Create a transport that returns each reply in order, then network
    /// errors once the script runs out.
    #[must_use]
    pub fn new(replies: Vec<Result<String, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Labels of the credentials used, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn complete(
        &self,
        credential: &Credential,
        _request: &ChatCompletionRequest,
    ) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(credential.label().to_owned());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("script exhausted".into())))
    }
}
