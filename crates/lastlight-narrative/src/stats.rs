//! Trait and relationship counters.
//!
//! Counters only ever go up. A sentence bumps each category at most once per
//! character and each relationship at most once per pair.

use std::fmt;

use lastlight_roster::Roster;
use serde::{Deserialize, Serialize};

use crate::text::{mentions_in, sentences, words};
use crate::vocab::{
    BOND_WORDS, CONFLICT_WORDS, DIGNIFIED_WORDS, HELPFUL_WORDS, RESOURCEFUL_WORDS, SINISTER_WORDS,
    contains,
};

/// Per-character trait category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    /// Helping, saving or protecting others.
    Helpful,
    /// Building, scavenging or improvising.
    Resourceful,
    /// Betrayal, theft or threats.
    Sinister,
    /// Sacrifice, forgiveness or composure.
    Dignified,
}

impl TraitCategory {
    pub const ALL: [Self; 4] = [
        Self::Helpful,
        Self::Resourceful,
        Self::Sinister,
        Self::Dignified,
    ];

    fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Self::Helpful => HELPFUL_WORDS,
            Self::Resourceful => RESOURCEFUL_WORDS,
            Self::Sinister => SINISTER_WORDS,
            Self::Dignified => DIGNIFIED_WORDS,
        }
    }

    /// Title used in the end-of-game summary.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Helpful => "Most helpful",
            Self::Resourceful => "Most resourceful",
            Self::Sinister => "Most sinister",
            Self::Dignified => "Most dignified",
        }
    }
}

/// Pair relationship kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Two characters working together or supporting each other.
    Bond,
    /// Two characters clashing.
    Conflict,
}

impl RelationKind {
    fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Self::Bond => BOND_WORDS,
            Self::Conflict => CONFLICT_WORDS,
        }
    }
}

/// Trait counters for one character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCounters {
    /// Canonical character name.
    pub name: String,
    /// Helpful acts seen.
    pub helpful: u32,
    /// Resourceful acts seen.
    pub resourceful: u32,
    /// Sinister acts seen.
    pub sinister: u32,
    /// Dignified acts seen.
    pub dignified: u32,
}

impl CharacterCounters {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Counter value for `category`.
    #[must_use]
    pub fn get(&self, category: TraitCategory) -> u32 {
        match category {
            TraitCategory::Helpful => self.helpful,
            TraitCategory::Resourceful => self.resourceful,
            TraitCategory::Sinister => self.sinister,
            TraitCategory::Dignified => self.dignified,
        }
    }

    fn bump(&mut self, category: TraitCategory) {
        let slot = match category {
            TraitCategory::Helpful => &mut self.helpful,
            TraitCategory::Resourceful => &mut self.resourceful,
            TraitCategory::Sinister => &mut self.sinister,
            TraitCategory::Dignified => &mut self.dignified,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Counter for an unordered pair; `a` sorts before `b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCount {
    /// The alphabetically first name.
    pub a: String,
    /// The other name.
    pub b: String,
    /// Times the pair was seen together with a matching keyword.
    pub count: u32,
}

impl fmt::Display for PairCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {} ({})", self.a, self.b, self.count)
    }
}

/// All stats of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsLedger {
    /// Trait counters, one per roster character in roster order.
    pub characters: Vec<CharacterCounters>,
    /// Bond counters in first-encountered order.
    pub bonds: Vec<PairCount>,
    /// Conflict counters in first-encountered order.
    pub conflicts: Vec<PairCount>,
}

/// The winners of each category, for the end-of-game summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Leading character and count per category; categories nobody scored
    /// in are left out.
    pub leaders: Vec<(TraitCategory, String, u32)>,
    /// The most frequent bond, if any.
    pub strongest_bond: Option<PairCount>,
    /// The most frequent conflict, if any.
    pub strongest_conflict: Option<PairCount>,
}

impl StatsLedger {
    /// A zeroed ledger with one entry per roster character.
    #[must_use]
    pub fn new(roster: &Roster) -> Self {
        Self {
            characters: roster
                .characters()
                .iter()
                .map(|c| CharacterCounters::new(c.name))
                .collect(),
            bonds: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Counters for `name`.
    #[must_use]
    pub fn character(&self, name: &str) -> Option<&CharacterCounters> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Counter for the unordered pair `x`/`y`, zero if never seen.
    #[must_use]
    pub fn pair(&self, kind: RelationKind, x: &str, y: &str) -> u32 {
        let (a, b) = ordered(x, y);
        self.pairs(kind)
            .iter()
            .find(|p| p.a == a && p.b == b)
            .map_or(0, |p| p.count)
    }

    fn pairs(&self, kind: RelationKind) -> &[PairCount] {
        match kind {
            RelationKind::Bond => &self.bonds,
            RelationKind::Conflict => &self.conflicts,
        }
    }

    fn pairs_mut(&mut self, kind: RelationKind) -> &mut Vec<PairCount> {
        match kind {
            RelationKind::Bond => &mut self.bonds,
            RelationKind::Conflict => &mut self.conflicts,
        }
    }

    /// Updates counters from a fragment of narration.
    ///
    /// Trait counters apply to any catalog character mentioned in a sentence
    /// containing a word of that category. Pair counters apply to alive
    /// characters mentioned together in a sentence with a bond or conflict
    /// word.
    pub fn track(&mut self, text: &str, roster: &Roster, alive: &[String]) {
        for sentence in sentences(text) {
            let tokens = words(sentence);
            let mut named: Vec<&'static str> = Vec::new();
            for mention in mentions_in(&tokens, roster) {
                if !named.contains(&mention.name) {
                    named.push(mention.name);
                }
            }
            if named.is_empty() {
                continue;
            }

            for category in TraitCategory::ALL {
                if !tokens.iter().any(|t| contains(category.vocabulary(), t)) {
                    continue;
                }
                for name in &named {
                    if let Some(counters) = self.characters.iter_mut().find(|c| c.name == *name) {
                        counters.bump(category);
                    }
                }
            }

            let present: Vec<&str> = named
                .iter()
                .copied()
                .filter(|n| alive.iter().any(|a| a == n))
                .collect();
            if present.len() < 2 {
                continue;
            }
            for kind in [RelationKind::Bond, RelationKind::Conflict] {
                if !tokens.iter().any(|t| contains(kind.vocabulary(), t)) {
                    continue;
                }
                for (i, x) in present.iter().enumerate() {
                    for y in &present[i + 1..] {
                        self.bump_pair(kind, x, y);
                    }
                }
            }
        }
    }

    fn bump_pair(&mut self, kind: RelationKind, x: &str, y: &str) {
        let (a, b) = ordered(x, y);
        let pairs = self.pairs_mut(kind);
        if let Some(pair) = pairs.iter_mut().find(|p| p.a == a && p.b == b) {
            pair.count = pair.count.saturating_add(1);
        } else {
            pairs.push(PairCount {
                a: a.to_owned(),
                b: b.to_owned(),
                count: 1,
            });
        }
    }

    /// Highest counter in `category`; the first character in roster order
    /// wins a tie. `None` when nobody scored.
    #[must_use]
    pub fn leader(&self, category: TraitCategory) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for counters in &self.characters {
            let value = counters.get(category);
            if value > best.map_or(0, |(_, v)| v) {
                best = Some((counters.name.as_str(), value));
            }
        }
        best
    }

    /// Pair with the highest count; the first recorded pair wins a tie.
    #[must_use]
    pub fn strongest(&self, kind: RelationKind) -> Option<&PairCount> {
        let mut best: Option<&PairCount> = None;
        for pair in self.pairs(kind) {
            if pair.count > best.map_or(0, |p| p.count) {
                best = Some(pair);
            }
        }
        best
    }

    /// Leaders of every category plus the strongest bond and conflict.
    #[must_use]
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            leaders: TraitCategory::ALL
                .iter()
                .filter_map(|c| self.leader(*c).map(|(name, v)| (*c, name.to_owned(), v)))
                .collect(),
            strongest_bond: self.strongest(RelationKind::Bond).cloned(),
            strongest_conflict: self.strongest(RelationKind::Conflict).cloned(),
        }
    }
}

fn ordered<'a>(x: &'a str, y: &'a str) -> (&'a str, &'a str) {
    if x <= y { (x, y) } else { (y, x) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn test_new_ledger_has_zeroed_entry_per_character() {
        let ledger = StatsLedger::new(Roster::standard());

        assert_eq!(ledger.characters.len(), Roster::standard().characters().len());
        assert!(ledger.leader(TraitCategory::Helpful).is_none());
        assert!(ledger.strongest(RelationKind::Bond).is_none());
    }

    #[test]
    fn test_track_counts_once_per_sentence_per_category() {
        // Arrange
        let roster = Roster::standard();
        let mut ledger = StatsLedger::new(roster);

        // Act
        ledger.track(
            "Jordan helps Ella and rescues the dog. Jordan improvises a torch!",
            roster,
            &alive(&["Jordan", "Ella Muy"]),
        );

        // Assert
        let jordan = ledger.character("Jordan").unwrap();
        assert_eq!(jordan.helpful, 1);
        assert_eq!(jordan.resourceful, 1);
        assert_eq!(ledger.character("Ella Muy").unwrap().helpful, 1);
        assert_eq!(ledger.character("Ella Muy").unwrap().resourceful, 0);
    }

    #[test]
    fn test_pairs_only_count_alive_characters() {
        let roster = Roster::standard();
        let mut ledger = StatsLedger::new(roster);

        ledger.track(
            "Kate hugs Dylan while Marcus laughs.",
            roster,
            &alive(&["Kate Nguyen", "Dylan Vo"]),
        );

        assert_eq!(ledger.pair(RelationKind::Bond, "Dylan Vo", "Kate Nguyen"), 1);
        assert_eq!(ledger.pair(RelationKind::Bond, "Kate Nguyen", "Marcus Hale"), 0);
        assert_eq!(ledger.bonds.len(), 1);
    }

    #[test]
    fn test_conflict_pairs_are_unordered() {
        let roster = Roster::standard();
        let mut ledger = StatsLedger::new(roster);
        let everyone = alive(&["Shaun Sadsarin", "Addison Sadsarin"]);

        ledger.track("Shaun argues with Addison.", roster, &everyone);
        ledger.track("Addison blames Shaun.", roster, &everyone);

        assert_eq!(
            ledger.pair(RelationKind::Conflict, "Shaun Sadsarin", "Addison Sadsarin"),
            2
        );
        assert_eq!(ledger.conflicts[0].a, "Addison Sadsarin");
    }

    #[test]
    fn test_leader_ties_go_to_roster_order() {
        let roster = Roster::standard();
        let mut ledger = StatsLedger::new(roster);
        let everyone = roster.names();

        ledger.track("Benny betrays the group.", roster, &everyone);
        ledger.track("Shaun steals the keys.", roster, &everyone);

        assert_eq!(ledger.leader(TraitCategory::Sinister), Some(("Shaun Sadsarin", 1)));
    }

    #[test]
    fn test_summary_lists_only_scoring_categories() {
        let roster = Roster::standard();
        let mut ledger = StatsLedger::new(roster);
        let everyone = roster.names();

        ledger.track("Priya repairs the radio. Priya and Tess share a laugh together.", roster, &everyone);

        let summary = ledger.summary();
        assert_eq!(
            summary.leaders,
            vec![(TraitCategory::Resourceful, "Priya Raman".to_owned(), 1)]
        );
        assert_eq!(summary.strongest_bond.unwrap().to_string(), "Priya Raman & Tess Okafor (1)");
        assert!(summary.strongest_conflict.is_none());
    }
}
