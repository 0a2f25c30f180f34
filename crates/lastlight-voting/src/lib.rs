//! Last Light — Vote Aggregator.
//!
//! Collects two-option reaction votes on a chat message over a bounded
//! session that closes early once voting goes quiet.

pub mod aggregator;

pub use aggregator::{DEFAULT_CEILING, DEFAULT_INACTIVITY, DEFAULT_SETTLE, VoteAggregator};
