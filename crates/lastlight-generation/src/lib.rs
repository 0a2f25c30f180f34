//! Last Light — Generation Client.
//!
//! Sends chat-completion requests to an external text-generation endpoint,
//! rotating across a pool of credentials and parking credentials that fail
//! with authorization, rate-limit or availability errors.

pub mod client;
pub mod credentials;
pub mod request;
pub mod transport;

pub use client::{GenerationClient, TextGenerator};
pub use credentials::Credential;
pub use request::GenerationRequest;
pub use transport::{CompletionTransport, HttpTransport, TransportError};
