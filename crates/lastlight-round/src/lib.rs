//! Last Light — Round State Machine.
//!
//! Owns the game state model and drives each round through its phases:
//! scene, health, dilemma, choices, vote and outcome. Sessions are tracked
//! by a registry that allows at most one active game.

pub mod application;
pub mod domain;
