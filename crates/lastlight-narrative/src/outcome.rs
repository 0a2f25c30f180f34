//! Death and survivor extraction.

use lastlight_core::rng::DeterministicRng;
use lastlight_roster::Roster;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::text::{has_leading_marker, mentions_in, sentences, strip_leading_marker, strip_markup, words};
use crate::vocab::{DEATH_NEGATORS, DEATH_WORDS, contains};

/// Maximum distance, in words, between a name and a death word.
const DEATH_WINDOW: usize = 6;

const DEATH_LABELS: &[&str] = &["deaths", "death", "dead", "died", "deceased", "casualties"];
const SURVIVOR_LABELS: &[&str] = &["survivors", "survivor", "survived", "alive", "still alive"];

/// Where the death list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathSource {
    /// An explicit `Deaths:` block.
    Labeled,
    /// Co-occurrence of names and death words in the narration.
    Inferred,
}

/// Who died and who carries on after an outcome.
///
/// Both lists are deduplicated, disjoint, and drawn from the alive set the
/// outcome was parsed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeFacts {
    /// Characters who died this round.
    pub deaths: Vec<String>,
    /// Characters who continue.
    pub survivors: Vec<String>,
    /// How `deaths` was determined.
    pub source: DeathSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Deaths,
    Survivors,
}

/// Extracts deaths and survivors from outcome narration.
///
/// Explicit `Deaths:` / `Survivors:` blocks win. Without a deaths block,
/// deaths are inferred from names near death words. Survivors default to
/// everyone else. If nobody survives but somebody died, one name is picked
/// through `rng` so the story can go on.
pub fn extract_outcome(
    text: &str,
    alive_before: &[String],
    roster: &Roster,
    rng: &mut dyn DeterministicRng,
) -> OutcomeFacts {
    let labeled_deaths = labeled_block(text, Label::Deaths, roster);
    let labeled_survivors = labeled_block(text, Label::Survivors, roster);

    let (raw_deaths, source) = match labeled_deaths {
        Some(names) => (names, DeathSource::Labeled),
        None => (infer_deaths(text, roster), DeathSource::Inferred),
    };

    let mut deaths: Vec<String> = Vec::new();
    for name in raw_deaths {
        if alive_before.contains(&name) && !deaths.contains(&name) {
            deaths.push(name);
        }
    }

    let mut survivors: Vec<String> = match labeled_survivors {
        Some(names) => {
            let mut kept = Vec::new();
            for name in names {
                if alive_before.contains(&name) && !deaths.contains(&name) && !kept.contains(&name) {
                    kept.push(name);
                }
            }
            kept
        }
        None => alive_before
            .iter()
            .filter(|name| !deaths.contains(name))
            .cloned()
            .collect(),
    };

    if survivors.is_empty() && !deaths.is_empty() {
        let remaining: Vec<&String> = alive_before.iter().filter(|n| !deaths.contains(n)).collect();
        let chosen = if remaining.is_empty() {
            let pick = deaths.remove(rng.pick_index(deaths.len()));
            debug!(name = %pick, "everyone died; sparing one character");
            pick
        } else {
            remaining[rng.pick_index(remaining.len())].clone()
        };
        survivors.push(chosen);
    }

    OutcomeFacts {
        deaths,
        survivors,
        source,
    }
}

/// Classifies a line as a label line and returns the text after the colon.
fn label_of(line: &str) -> Option<(Label, String)> {
    let plain = strip_markup(line);
    let body = strip_leading_marker(&plain);
    let (head, rest) = body.split_once(':')?;
    let head = head.trim().to_lowercase();
    let label = if DEATH_LABELS.contains(&head.as_str()) {
        Label::Deaths
    } else if SURVIVOR_LABELS.contains(&head.as_str()) {
        Label::Survivors
    } else {
        return None;
    };
    Some((label, rest.trim().to_owned()))
}

/// Finds the first block with `wanted` label and resolves its names.
/// `None` means no such block exists; `Some(vec![])` means it listed nobody.
fn labeled_block(text: &str, wanted: Label, roster: &Roster) -> Option<Vec<String>> {
    let lines: Vec<&str> = text.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        let Some((label, inline)) = label_of(line) else {
            continue;
        };
        if label != wanted {
            continue;
        }

        let mut tokens: Vec<String> = split_inline(&inline);
        for next in &lines[i + 1..] {
            let trimmed = next.trim();
            if trimmed.is_empty() {
                if tokens.is_empty() {
                    continue;
                }
                break;
            }
            if label_of(trimmed).is_some() || !has_leading_marker(trimmed) {
                break;
            }
            tokens.extend(split_inline(strip_leading_marker(trimmed)));
        }

        let mut names = Vec::new();
        for token in tokens {
            if let Some(character) = roster.resolve(&token) {
                let name = character.name.to_owned();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        return Some(names);
    }

    None
}

/// Splits a comma/semicolon/"and"-separated list.
fn split_inline(list: &str) -> Vec<String> {
    list.split([',', ';', '&'])
        .flat_map(|part| part.split(" and "))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Names that sit near a death word in the same sentence. Each death word
/// is attributed to the closest mention within the window, preferring the
/// name before it on a tie.
fn infer_deaths(text: &str, roster: &Roster) -> Vec<String> {
    let mut deaths: Vec<String> = Vec::new();

    for sentence in sentences(text) {
        let tokens = words(sentence);
        let mentions = mentions_in(&tokens, roster);
        if mentions.is_empty() {
            continue;
        }

        for (index, token) in tokens.iter().enumerate() {
            if !contains(DEATH_WORDS, token) || is_negated(&tokens, index) {
                continue;
            }
            let nearest = mentions
                .iter()
                .filter_map(|m| {
                    let distance = if m.end <= index {
                        index - (m.end - 1)
                    } else if m.start > index {
                        m.start - index
                    } else {
                        return None;
                    };
                    (distance <= DEATH_WINDOW).then_some((distance, m.start > index, m.name))
                })
                .min_by_key(|(distance, after, _)| (*distance, *after));

            if let Some((_, _, name)) = nearest {
                if !deaths.iter().any(|d| d == name) {
                    deaths.push(name.to_owned());
                }
            }
        }
    }

    deaths
}

/// Whether one of the two words before `index` cancels the death word.
fn is_negated(tokens: &[String], index: usize) -> bool {
    tokens[index.saturating_sub(2)..index]
        .iter()
        .any(|t| contains(DEATH_NEGATORS, t))
}
