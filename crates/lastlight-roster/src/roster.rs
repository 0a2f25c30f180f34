//! Name lookups over a set of characters.

use std::sync::LazyLock;

use crate::catalog::CATALOG;
use crate::character::Character;

static STANDARD: LazyLock<Roster> = LazyLock::new(|| Roster::new(CATALOG.to_vec()));

/// A way a character can be mentioned in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention {
    /// Text to look for (full name or first name).
    pub pattern: &'static str,
    /// Canonical full name it refers to.
    pub name: &'static str,
}

/// An ordered collection of characters with fuzzy name resolution.
#[derive(Debug, Clone)]
pub struct Roster {
    characters: Vec<Character>,
    mentions: Vec<Mention>,
}

impl Roster {
    /// Builds a roster from characters in roster order.
    #[must_use]
    pub fn new(characters: Vec<Character>) -> Self {
        let mut mentions: Vec<Mention> = Vec::new();
        for character in &characters {
            mentions.push(Mention {
                pattern: character.name,
                name: character.name,
            });
            let first = character.first_name();
            let first_is_unique = characters
                .iter()
                .filter(|c| c.first_name().eq_ignore_ascii_case(first))
                .count()
                == 1;
            if first != character.name && first_is_unique {
                mentions.push(Mention {
                    pattern: first,
                    name: character.name,
                });
            }
        }
        // Longest first so "Ella Muy" wins over "Ella".
        mentions.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));

        Self {
            characters,
            mentions,
        }
    }

    /// The process-wide standard cast.
    #[must_use]
    pub fn standard() -> &'static Roster {
        &STANDARD
    }

    /// All characters in roster order.
    #[must_use]
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// All full names in roster order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.characters.iter().map(|c| c.name.to_owned()).collect()
    }

    /// Looks a character up by exact full name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Whether the exact full name is in the roster.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Name mentions, longest pattern first.
    #[must_use]
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    /// Resolves a loosely written name to a catalog character.
    ///
    /// Tries, in order: exact full name, exact first name, case-insensitive
    /// full name, case-insensitive first name. Surrounding markup, trailing
    /// punctuation and possessive suffixes are ignored.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&Character> {
        let cleaned = clean_token(token);
        if cleaned.is_empty() {
            return None;
        }

        self.characters
            .iter()
            .find(|c| c.name == cleaned)
            .or_else(|| self.unique_first_name(|first| first == cleaned))
            .or_else(|| {
                self.characters
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(&cleaned))
            })
            .or_else(|| self.unique_first_name(|first| first.eq_ignore_ascii_case(&cleaned)))
    }

    fn unique_first_name(&self, matches: impl Fn(&str) -> bool) -> Option<&Character> {
        let mut found = self.characters.iter().filter(|c| matches(c.first_name()));
        let first = found.next()?;
        if found.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Prompt lines (`Name (age, gender): traits`) for the given names, in
    /// the order given. Unknown names are skipped.
    #[must_use]
    pub fn trait_summary(&self, names: &[String]) -> String {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .map(|c| format!("- {}", c.prompt_line()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Strips markup, bullets, trailing punctuation and possessives from a name
/// token.
fn clean_token(token: &str) -> String {
    let trimmed = token
        .trim()
        .trim_start_matches(['•', '-', '–', '—', '·'])
        .trim_matches(|c: char| c == '*' || c == '_' || c == '`' || c.is_whitespace())
        .trim_end_matches(['.', ',', ';', ':', '!', '?', ')'])
        .trim_start_matches('(')
        .trim_matches(|c: char| c == '*' || c == '_' || c.is_whitespace());

    let without_possessive = trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("\u{2019}s"))
        .or_else(|| trimmed.strip_suffix('\''))
        .unwrap_or(trimmed);

    without_possessive
        .trim_matches(|c: char| c == '*' || c == '_')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
