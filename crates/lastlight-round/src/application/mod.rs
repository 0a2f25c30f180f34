//! Round orchestration and command handling.

pub mod command_handlers;
pub mod engine;
pub mod prompts;
pub mod query_handlers;
pub mod session;
pub mod snapshots;
