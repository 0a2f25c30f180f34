//! Last Light Core — shared abstractions.
//!
//! This crate defines the traits and types every other crate in the round
//! engine depends on: time and randomness seams, the error taxonomy, and the
//! interfaces of the external collaborators (chat platform, command
//! responders, snapshot persistence). It contains no infrastructure code.

pub mod chat;
pub mod clock;
pub mod error;
pub mod responder;
pub mod rng;
pub mod store;
