//! Heuristic interpretation of generated narrative text.
//!
//! Turns free text into bullet statements, health descriptors, dilemmas,
//! choices and death/survivor lists, and keeps the trait and relationship
//! counters. Every extractor is total and falls back to placeholders.

pub mod bullets;
pub mod choices;
pub mod health;
pub mod interpreter;
pub mod outcome;
pub mod stats;
pub mod text;
mod vocab;

pub use bullets::{BULLET, NameHighlighter, format_narration, normalize_bullets};
pub use choices::{choice_text, extract_choices, extract_dilemma};
pub use health::{HealthEntry, HealthReport, HealthTier, NO_STATUS, extract_health};
pub use interpreter::{HeuristicInterpreter, NarrativeInterpreter};
pub use outcome::{DeathSource, OutcomeFacts, extract_outcome};
pub use stats::{
    CharacterCounters, PairCount, RelationKind, StatsLedger, StatsSummary, TraitCategory,
};
pub use text::tail_chars;
