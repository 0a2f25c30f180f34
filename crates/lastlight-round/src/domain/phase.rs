//! Round phases and game endings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A step of a round, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Narration of what the group is doing.
    Scene,
    /// Condition report for every alive character.
    Health,
    /// The two-point problem the group faces.
    Dilemma,
    /// The two numbered options.
    Choices,
    /// Reaction voting on the options.
    Vote,
    /// Consequences of the winning option.
    Outcome,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scene => "scene",
            Self::Health => "health",
            Self::Dilemma => "dilemma",
            Self::Choices => "choices",
            Self::Vote => "vote",
            Self::Outcome => "outcome",
        };
        f.write_str(name)
    }
}

/// Why a game stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEnd {
    /// One character is left standing.
    Victory {
        /// The last character alive.
        survivor: String,
    },
    /// Both options received zero votes.
    NoVotes,
    /// The generator returned nothing for a phase.
    GenerationFailed {
        /// The phase that got no text.
        phase: Phase,
    },
    /// Someone asked the game to stop.
    Terminated,
}
