//! Per-character health descriptors.

use std::fmt;

use lastlight_roster::Roster;
use serde::{Deserialize, Serialize};

use crate::text::{first_words, strip_leading_marker, strip_markup};

/// Placeholder for alive characters the model did not describe.
pub const NO_STATUS: &str = "no status reported";

/// Maximum number of words kept from a descriptor.
const DESCRIPTOR_WORDS: usize = 7;

const SEPARATORS: [char; 8] = [':', '-', '–', '—', ',', '(', ')', ' '];

/// Traffic-light ranking of a health entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    /// Healthiest third.
    Stable,
    /// Middle third.
    Wounded,
    /// Worst third and any remainder.
    Critical,
}

impl HealthTier {
    /// Indicator shown before the name.
    #[must_use]
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Stable => "🟢",
            Self::Wounded => "🟡",
            Self::Critical => "🔴",
        }
    }
}

/// One alive character's condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthEntry {
    /// Canonical character name.
    pub name: String,
    /// Short condition descriptor, or the placeholder when none was given.
    pub status: String,
    /// Severity bucket used for the indicator emoji.
    pub tier: HealthTier,
}

/// Health of every alive character, ordered as the model listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// One entry per alive character.
    pub entries: Vec<HealthEntry>,
}

impl HealthReport {
    /// Descriptor for `name`, if present.
    #[must_use]
    pub fn status_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.status.as_str())
    }

    /// One display line per entry.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for HealthEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} **{}**: {}", self.tier.indicator(), self.name, self.status)
    }
}

/// Parses `Name: descriptor` or `Name is descriptor` lines for the alive
/// characters and ranks them into three tiers.
///
/// Every alive character appears exactly once. Characters the text does not
/// describe get [`NO_STATUS`] and are appended after the described ones.
/// Each tier holds `alive.len() / 3` entries; the remainder is critical.
#[must_use]
pub fn extract_health(text: &str, alive: &[String], roster: &Roster) -> HealthReport {
    let mut described: Vec<(String, String)> = Vec::new();

    for line in text.lines() {
        let plain = strip_markup(line);
        let body = strip_leading_marker(&plain).trim();
        let Some((name, rest)) = leading_name(body, alive, roster) else {
            continue;
        };
        if described.iter().any(|(n, _)| n == name) {
            continue;
        }
        let status = descriptor(rest);
        if !status.is_empty() {
            described.push((name.to_owned(), status));
        }
    }

    for name in alive {
        if !described.iter().any(|(n, _)| n == name) {
            described.push((name.clone(), NO_STATUS.to_owned()));
        }
    }

    let third = described.len() / 3;
    let entries = described
        .into_iter()
        .enumerate()
        .map(|(i, (name, status))| {
            let tier = if i < third {
                HealthTier::Stable
            } else if i < 2 * third {
                HealthTier::Wounded
            } else {
                HealthTier::Critical
            };
            HealthEntry { name, status, tier }
        })
        .collect();

    HealthReport { entries }
}

/// Matches an alive character's full or first name at the start of `line`
/// and returns the canonical name with the remainder of the line.
fn leading_name<'a>(line: &'a str, alive: &[String], roster: &Roster) -> Option<(&'static str, &'a str)> {
    for mention in roster.mentions() {
        let len = mention.pattern.len();
        let Some(head) = line.get(..len) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(mention.pattern) {
            continue;
        }
        let rest = &line[len..];
        if rest.starts_with(char::is_alphanumeric) {
            continue;
        }
        if alive.iter().any(|a| a == mention.name) {
            return Some((mention.name, rest));
        }
    }
    None
}

/// Cleans the text after a name into a short descriptor.
fn descriptor(rest: &str) -> String {
    let rest = rest
        .strip_prefix("'s")
        .or_else(|| rest.strip_prefix("\u{2019}s"))
        .unwrap_or(rest);
    let mut rest = rest.trim_start_matches(SEPARATORS);
    if let Some(stripped) = rest.get(..3).filter(|h| h.eq_ignore_ascii_case("is ")) {
        rest = &rest[stripped.len()..];
    }
    let words = first_words(rest, DESCRIPTOR_WORDS);
    words
        .trim_end_matches(['.', ',', ';', ':', '!', ')', ' '])
        .to_owned()
}
