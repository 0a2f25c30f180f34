//! Credential-rotating generation client.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use lastlight_core::clock::Clock;
use tracing::{debug, error, info, warn};

use crate::credentials::{CooldownTable, Credential};
use crate::request::GenerationRequest;
use crate::transport::CompletionTransport;

/// Default time a failing credential is parked.
pub const DEFAULT_COOLDOWN_MINUTES: i64 = 10;

/// Anything that can turn a request into text.
///
/// `None` is the definitive "no result" signal: every retry the
/// implementation is willing to make has already been made.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `request`.
    async fn generate(&self, request: &GenerationRequest) -> Option<String>;
}

/// Generation client that walks a credential pool in order.
///
/// The cooldown table lives inside the client and the client is shared
/// process-wide, so two games running at once would contend on it. Only one
/// game is ever active.
pub struct GenerationClient {
    transport: Arc<dyn CompletionTransport>,
    credentials: Vec<Credential>,
    model: String,
    cooldown: Duration,
    clock: Arc<dyn Clock>,
    cooldowns: Mutex<CooldownTable>,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("credentials", &self.credentials)
            .field("model", &self.model)
            .field("cooldown", &self.cooldown)
            .finish_non_exhaustive()
    }
}

impl GenerationClient {
    /// Creates a client with the default ten-minute cooldown.
    #[must_use]
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        credentials: Vec<Credential>,
        model: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            credentials,
            model: model.into(),
            cooldown: Duration::minutes(DEFAULT_COOLDOWN_MINUTES),
            clock,
            cooldowns: Mutex::new(CooldownTable::default()),
        }
    }

    /// Overrides the cooldown period.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Number of credentials in the pool.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.credentials.len()
    }

    /// When the labelled credential becomes usable again, if it is parked.
    #[must_use]
    pub fn cooling_until(&self, label: &str) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        let mut table = self.table();
        if table.is_cooling(label, now) {
            table.until(label)
        } else {
            None
        }
    }

    fn table(&self) -> MutexGuard<'_, CooldownTable> {
        // The table holds plain timestamps; a poisoned lock leaves it usable.
        self.cooldowns.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Option<String> {
        let body = request.to_completion(&self.model);

        for credential in &self.credentials {
            let now = self.clock.now();
            if self.table().is_cooling(credential.label(), now) {
                debug!(credential = credential.label(), "skipping credential in cooldown");
                continue;
            }

            match self.transport.complete(credential, &body).await {
                Ok(text) => {
                    info!(credential = credential.label(), chars = text.len(), "generation succeeded");
                    return Some(text);
                }
                Err(err) if err.triggers_cooldown() => {
                    warn!(
                        credential = credential.label(),
                        error = %err,
                        cooldown_secs = self.cooldown.num_seconds(),
                        "credential failed; parking it"
                    );
                    self.table()
                        .park(credential.label(), self.clock.now(), self.cooldown);
                }
                Err(err) => {
                    warn!(credential = credential.label(), error = %err, "generation attempt failed");
                }
            }
        }

        error!(pool = self.credentials.len(), "all credentials exhausted or cooling down");
        None
    }
}
