//! Pluggable interpretation of generated text.

use lastlight_core::rng::DeterministicRng;
use lastlight_roster::Roster;

use crate::bullets::{NameHighlighter, format_narration};
use crate::choices::{extract_choices, extract_dilemma};
use crate::health::{HealthReport, extract_health};
use crate::outcome::{OutcomeFacts, extract_outcome};
use crate::stats::StatsLedger;

/// Turns model text into game facts.
///
/// Every method is total: malformed input yields a structurally valid,
/// possibly placeholder, result.
pub trait NarrativeInterpreter: Send + Sync {
    /// Bulleted narration with names emphasized.
    fn narration(&self, text: &str) -> Vec<String>;

    /// Health of every alive character.
    fn health(&self, text: &str, alive: &[String]) -> HealthReport;

    /// Exactly two dilemma bullets.
    fn dilemma(&self, text: &str) -> [String; 2];

    /// Exactly two numbered choices.
    fn choices(&self, text: &str) -> [String; 2];

    /// Deaths and survivors relative to `alive_before`.
    fn outcome(
        &self,
        text: &str,
        alive_before: &[String],
        rng: &mut dyn DeterministicRng,
    ) -> OutcomeFacts;

    /// Feeds narration into the stats counters.
    fn track_stats(&self, ledger: &mut StatsLedger, text: &str, alive: &[String]);

    /// The cast this interpreter recognizes.
    fn roster(&self) -> &Roster;
}

/// Keyword and pattern based interpreter.
#[derive(Debug, Clone)]
pub struct HeuristicInterpreter {
    roster: Roster,
    highlighter: NameHighlighter,
}

impl HeuristicInterpreter {
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        let highlighter = NameHighlighter::new(&roster);
        Self {
            roster,
            highlighter,
        }
    }

    /// Interpreter over the standard cast.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Roster::standard().clone())
    }
}

impl Default for HeuristicInterpreter {
    fn default() -> Self {
        Self::standard()
    }
}

impl NarrativeInterpreter for HeuristicInterpreter {
    fn narration(&self, text: &str) -> Vec<String> {
        format_narration(text, &self.highlighter)
    }

    fn health(&self, text: &str, alive: &[String]) -> HealthReport {
        extract_health(text, alive, &self.roster)
    }

    fn dilemma(&self, text: &str) -> [String; 2] {
        extract_dilemma(text).map(|line| self.highlighter.emphasize(&line))
    }

    fn choices(&self, text: &str) -> [String; 2] {
        extract_choices(text)
    }

    fn outcome(
        &self,
        text: &str,
        alive_before: &[String],
        rng: &mut dyn DeterministicRng,
    ) -> OutcomeFacts {
        extract_outcome(text, alive_before, &self.roster, rng)
    }

    fn track_stats(&self, ledger: &mut StatsLedger, text: &str, alive: &[String]) {
        ledger.track(text, &self.roster, alive);
    }

    fn roster(&self) -> &Roster {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilemma_bullets_are_emphasized() {
        let interpreter = HeuristicInterpreter::standard();

        let dilemma = interpreter.dilemma("Jordan is hurt\nThe exit is blocked");

        assert_eq!(dilemma, ["• **Jordan** is hurt.", "• The exit is blocked."]);
    }

    #[test]
    fn test_track_stats_goes_through_roster() {
        let interpreter = HeuristicInterpreter::standard();
        let mut ledger = StatsLedger::new(interpreter.roster());

        interpreter.track_stats(&mut ledger, "Ella saves Vivian.", &interpreter.roster().names());

        assert_eq!(ledger.character("Ella Muy").unwrap().helpful, 1);
        assert_eq!(ledger.character("Vivian Muy").unwrap().helpful, 1);
    }
}
