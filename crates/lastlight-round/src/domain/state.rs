//! The live state of one game.

use lastlight_core::error::GameError;
use lastlight_narrative::{OutcomeFacts, StatsLedger, tail_chars};
use lastlight_roster::Roster;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::speed::Speed;

/// Characters of prior narration kept for prompts.
pub const CONTEXT_WINDOW: usize = 1800;

/// Everything a game needs to continue, and everything that is persisted.
///
/// `alive` and `dead` are disjoint and drawn from the roster. `alive` never
/// grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Identifier used for log correlation.
    pub game_id: Uuid,
    /// Who started the game.
    pub initiator: String,
    /// The round about to be played, starting at 1.
    pub round_number: u32,
    /// Characters still in the story, in roster order.
    pub alive: Vec<String>,
    /// Characters who died, in order of death.
    pub dead: Vec<String>,
    /// The option the group picked last round.
    pub last_choice: String,
    /// Tail of the narration so far, bounded by [`CONTEXT_WINDOW`].
    pub story_context: String,
    /// The two numbered options offered in the current round.
    pub options: Vec<String>,
    /// Pacing multiplier.
    pub current_speed: Speed,
    /// Set once a stop was requested; the loop ends at the next checkpoint.
    pub terminated: bool,
    /// Trait and relationship counters.
    pub stats: StatsLedger,
}

impl GameState {
    /// A fresh game with the whole roster alive.
    #[must_use]
    pub fn new(game_id: Uuid, initiator: impl Into<String>, roster: &Roster) -> Self {
        Self {
            game_id,
            initiator: initiator.into(),
            round_number: 1,
            alive: roster.names(),
            dead: Vec::new(),
            last_choice: String::new(),
            story_context: String::new(),
            options: Vec::new(),
            current_speed: Speed::Normal,
            terminated: false,
            stats: StatsLedger::new(roster),
        }
    }

    /// Whether at most one character is left.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.alive.len() <= 1
    }

    /// Applies a round's outcome and returns the names that fell, deaths
    /// first and then anyone the survivor list left out.
    ///
    /// `alive` keeps its order and shrinks to the named survivors. An
    /// outcome naming none of the current survivors changes nothing, so a
    /// non-empty `alive` never becomes empty.
    pub fn apply_outcome(&mut self, facts: &OutcomeFacts) -> Vec<String> {
        if !self.alive.iter().any(|name| facts.survivors.contains(name)) {
            return Vec::new();
        }

        let mut fallen: Vec<String> = Vec::new();
        let doomed = facts
            .deaths
            .iter()
            .chain(self.alive.iter().filter(|name| !facts.survivors.contains(name)));
        for name in doomed {
            if self.alive.contains(name) && !fallen.contains(name) {
                fallen.push(name.clone());
            }
        }

        self.alive.retain(|name| !fallen.contains(name));
        for name in &fallen {
            if !self.dead.contains(name) {
                self.dead.push(name.clone());
            }
        }
        fallen
    }

    /// Appends narration to the story context, keeping only the tail window.
    pub fn append_context(&mut self, text: &str) {
        if !self.story_context.is_empty() {
            self.story_context.push_str("\n\n");
        }
        self.story_context.push_str(text.trim());
        let kept = tail_chars(&self.story_context, CONTEXT_WINDOW);
        if kept.len() != self.story_context.len() {
            self.story_context = kept.to_owned();
        }
    }

    /// Sets the pacing, normalizing unknown multipliers.
    pub fn set_speed(&mut self, multiplier: f64) -> Speed {
        self.current_speed = Speed::from_multiplier(multiplier);
        self.current_speed
    }

    /// Checks the invariants a resumed snapshot must satisfy.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Validation` if a name is unknown, duplicated,
    /// or both alive and dead.
    pub fn validate(&self, roster: &Roster) -> Result<(), GameError> {
        let mut seen: Vec<&str> = Vec::new();
        for name in self.alive.iter().chain(&self.dead) {
            if !roster.contains(name) {
                return Err(GameError::Validation(format!("unknown character {name}")));
            }
            if seen.contains(&name.as_str()) {
                return Err(GameError::Validation(format!(
                    "{name} is listed more than once"
                )));
            }
            seen.push(name);
        }
        if self.round_number == 0 {
            return Err(GameError::Validation("round number must start at 1".into()));
        }
        Ok(())
    }
}
