//! HTTP transport to an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use thiserror::Error;

use crate::credentials::Credential;
use crate::request::{ChatCompletionRequest, ChatCompletionResponse};

/// Classified failure of a single completion attempt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The credential was rejected (401/403).
    #[error("credential rejected with status {0}")]
    Unauthorized(u16),

    /// The credential hit a rate limit (429).
    #[error("rate limited")]
    RateLimited,

    /// The service is temporarily unavailable (503).
    #[error("service unavailable")]
    Unavailable,

    /// Any other non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// Connection, timeout or TLS failure.
    #[error("network error: {0}")]
    Network(String),

    /// The body could not be decoded or carried no text.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Classifies a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(status),
            429 => Self::RateLimited,
            503 => Self::Unavailable,
            _ => Self::Status {
                status,
                body: body.chars().take(200).collect(),
            },
        }
    }

    /// Whether this failure parks the credential for the cooldown period.
    #[must_use]
    pub fn triggers_cooldown(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::RateLimited | Self::Unavailable
        )
    }
}

/// Performs one completion attempt with one credential.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Sends `request` authenticated with `credential` and returns the text.
    async fn complete(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<String, TransportError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a transport with a preconfigured client (timeouts, proxies).
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn complete(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential.secret())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(TransportError::from_status(status.as_u16(), &body));
        }

        let decoded = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        decoded
            .into_text()
            .ok_or_else(|| TransportError::InvalidResponse("response contained no text".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(TransportError::from_status(401, ""), TransportError::Unauthorized(401));
        assert_eq!(TransportError::from_status(403, ""), TransportError::Unauthorized(403));
        assert_eq!(TransportError::from_status(429, ""), TransportError::RateLimited);
        assert_eq!(TransportError::from_status(503, ""), TransportError::Unavailable);
        assert!(matches!(
            TransportError::from_status(500, "boom"),
            TransportError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_only_auth_rate_limit_and_unavailable_cool_down() {
        assert!(TransportError::Unauthorized(401).triggers_cooldown());
        assert!(TransportError::RateLimited.triggers_cooldown());
        assert!(TransportError::Unavailable.triggers_cooldown());
        assert!(!TransportError::from_status(500, "").triggers_cooldown());
        assert!(!TransportError::Network("reset".into()).triggers_cooldown());
        assert!(!TransportError::InvalidResponse("bad json".into()).triggers_cooldown());
    }

    #[test]
    fn test_status_body_is_truncated() {
        let long = "x".repeat(1000);

        match TransportError::from_status(500, &long) {
            TransportError::Status { body, .. } => assert_eq!(body.len(), 200),
            other => panic!("expected Status, got {other:?}"),
        }
    }
}
