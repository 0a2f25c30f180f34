//! Shared test mocks and utilities for the Last Light round engine.

mod channel;
mod clock;
mod generator;
mod responder;
mod rng;
mod store;

pub use channel::RecordingChannel;
pub use clock::{FixedClock, ManualClock};
pub use generator::{ScriptedGenerator, ScriptedTransport};
pub use responder::{RecordingResponder, Reply};
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingSnapshotStore, InMemorySnapshotStore};
