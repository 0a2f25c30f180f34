//! Chat gateway adapter.
//!
//! Outbound traffic goes to the gateway's REST API. Inbound reaction events
//! arrive over HTTP (see `routes::gateway`) and are fanned out through the
//! broadcast sender held here, which is what vote collection subscribes to.

use async_trait::async_trait;
use lastlight_core::chat::{ChatChannel, MessageId, ReactionCounts, ReactionEvent, VoteOption};
use lastlight_core::error::GameError;
use reqwest::{Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::GatewayConfig;

/// Capacity of the reaction fan-out channel.
pub const REACTION_BUFFER: usize = 256;

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostedMessage {
    id: String,
}

/// One reaction summary as reported by the gateway.
#[derive(Debug, Deserialize)]
struct ReactionSummary {
    emoji: String,
    count: u32,
    /// Whether the engine's own account is among the reactors.
    #[serde(default)]
    me: bool,
}

/// `ChatChannel` backed by the chat gateway REST API.
#[derive(Clone)]
pub struct GatewayChannel {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    channel_id: String,
    events: broadcast::Sender<ReactionEvent>,
}

impl std::fmt::Debug for GatewayChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayChannel")
            .field("base_url", &self.base_url.as_str())
            .field("channel_id", &self.channel_id)
            .finish_non_exhaustive()
    }
}

impl GatewayChannel {
    /// Creates a channel adapter from configuration.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Validation` if the base URL does not parse.
    pub fn new(client: reqwest::Client, config: &GatewayConfig) -> Result<Self, GameError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GameError::Validation(format!("invalid gateway URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GameError::Validation(format!(
                "gateway URL cannot carry a path: {base_url}"
            )));
        }
        let (events, _) = broadcast::channel(REACTION_BUFFER);
        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
            channel_id: config.channel_id.clone(),
            events,
        })
    }

    /// Sender that inbound reaction events are published on.
    #[must_use]
    pub fn reaction_sender(&self) -> broadcast::Sender<ReactionEvent> {
        self.events.clone()
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("channels")
                .push(&self.channel_id)
                .extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.client.request(method, self.url(segments));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, GameError> {
        let response = builder
            .send()
            .await
            .map_err(|e| GameError::Platform(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        Err(GameError::Platform(format!("gateway returned {status}: {body}")))
    }
}

#[async_trait]
impl ChatChannel for GatewayChannel {
    async fn send_message(&self, text: &str) -> Result<MessageId, GameError> {
        let response = self
            .send(self.request(Method::POST, &["messages"]).json(&MessageBody { content: text }))
            .await?;
        let posted: PostedMessage = response
            .json()
            .await
            .map_err(|e| GameError::Platform(format!("malformed gateway reply: {e}")))?;
        debug!(message_id = %posted.id, chars = text.len(), "message posted");
        Ok(MessageId(posted.id))
    }

    async fn edit_message(&self, message: &MessageId, text: &str) -> Result<(), GameError> {
        self.send(
            self.request(Method::PATCH, &["messages", &message.0])
                .json(&MessageBody { content: text }),
        )
        .await?;
        Ok(())
    }

    async fn add_reaction(&self, message: &MessageId, emoji: &str) -> Result<(), GameError> {
        self.send(self.request(Method::PUT, &["messages", &message.0, "reactions", emoji]))
            .await?;
        Ok(())
    }

    async fn reaction_counts(&self, message: &MessageId) -> Result<ReactionCounts, GameError> {
        let response = self
            .send(self.request(Method::GET, &["messages", &message.0, "reactions"]))
            .await?;
        let summaries: Vec<ReactionSummary> = response
            .json()
            .await
            .map_err(|e| GameError::Platform(format!("malformed gateway reply: {e}")))?;

        let mut counts = ReactionCounts::default();
        for summary in summaries {
            let votes = summary.count.saturating_sub(u32::from(summary.me));
            match VoteOption::from_emoji(&summary.emoji) {
                Some(VoteOption::First) => counts.first += votes,
                Some(VoteOption::Second) => counts.second += votes,
                None => {}
            }
        }
        Ok(counts)
    }

    fn subscribe_reactions(&self) -> broadcast::Receiver<ReactionEvent> {
        self.events.subscribe()
    }
}
