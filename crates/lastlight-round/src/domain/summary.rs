//! Read-side views of a game.

use lastlight_narrative::{RelationKind, TraitCategory};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::phase::GameEnd;
use crate::domain::speed::Speed;
use crate::domain::state::GameState;

/// Snapshot of a game for status queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Identifier of the game.
    pub game_id: Uuid,
    /// Who started it.
    pub initiator: String,
    /// The round currently being played.
    pub round_number: u32,
    /// Characters still alive.
    pub alive: Vec<String>,
    /// Characters who died.
    pub dead: Vec<String>,
    /// Current pacing.
    pub speed: Speed,
    /// Whether a stop was requested.
    pub terminated: bool,
}

impl From<&GameState> for GameSummary {
    fn from(state: &GameState) -> Self {
        Self {
            game_id: state.game_id,
            initiator: state.initiator.clone(),
            round_number: state.round_number,
            alive: state.alive.clone(),
            dead: state.dead.clone(),
            speed: state.current_speed,
            terminated: state.terminated,
        }
    }
}

/// Renders the message posted when a game ends.
#[must_use]
pub fn render_final_summary(state: &GameState, end: &GameEnd) -> String {
    let mut lines = vec![match end {
        GameEnd::Victory { survivor } => format!("🏁 **{survivor}** is the last one standing."),
        GameEnd::NoVotes => "🏁 No votes were cast, so the story ends here.".to_owned(),
        GameEnd::GenerationFailed { phase } => format!(
            "⚠️ The {phase} phase failed: no story text could be generated. \
             Start the game again with resume to continue from the last saved round."
        ),
        GameEnd::Terminated => "🛑 The game was stopped.".to_owned(),
    }];

    let rounds = state.round_number.saturating_sub(1);
    lines.push(format!(
        "Rounds played: {rounds} · Alive: {} · Fallen: {}",
        state.alive.len(),
        state.dead.len()
    ));

    let stats = &state.stats;
    for category in TraitCategory::ALL {
        if let Some((name, count)) = stats.leader(category) {
            lines.push(format!("{}: **{name}** ({count})", category.title()));
        }
    }
    if let Some(pair) = stats.strongest(RelationKind::Bond) {
        lines.push(format!("Strongest bond: {pair}"));
    }
    if let Some(pair) = stats.strongest(RelationKind::Conflict) {
        lines.push(format!("Fiercest rivalry: {pair}"));
    }

    lines.join("\n")
}
