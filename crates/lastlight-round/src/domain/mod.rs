//! Game state, phases and commands.

pub mod commands;
pub mod phase;
pub mod speed;
pub mod state;
pub mod summary;
