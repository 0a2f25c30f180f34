//! Dilemma and choice extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::bullets::{BULLET, normalize_bullets};
use crate::text::{strip_leading_marker, strip_markup};

/// Bullets used to pad a dilemma that came back short.
pub const DILEMMA_PADDING: [&str; 2] = [
    "• The way forward is unclear.",
    "• Every option carries a cost.",
];

/// Options used when the model produced fewer than two usable lines.
pub const PLACEHOLDER_CHOICES: [&str; 2] = ["1. Option one", "2. Option two"];

static NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:[-•*]\s*)?(?:(?:option|choice)\s*)?([12])\s*[.):\-]\s*(\S.*)$")
        .expect("invalid choice regex")
});

/// Reduces dilemma text to exactly two bullets.
#[must_use]
pub fn extract_dilemma(text: &str) -> [String; 2] {
    let mut bullets = normalize_bullets(&strip_markup(text)).into_iter();
    let first = bullets
        .next()
        .unwrap_or_else(|| DILEMMA_PADDING[0].to_owned());
    let second = bullets.next().unwrap_or_else(|| {
        if first == DILEMMA_PADDING[0] {
            DILEMMA_PADDING[1].to_owned()
        } else {
            DILEMMA_PADDING[0].to_owned()
        }
    });
    [first, second]
}

/// Reduces choice text to exactly two lines numbered `1.` and `2.`.
///
/// Lines already numbered 1 and 2 win (the first of each). Otherwise the
/// first two non-empty lines are numbered in order, and with fewer than two
/// such lines both placeholders are returned.
#[must_use]
pub fn extract_choices(text: &str) -> [String; 2] {
    let mut numbered: [Option<String>; 2] = [None, None];

    for line in text.lines() {
        let plain = strip_markup(line);
        let Some(caps) = NUMBERED.captures(&plain) else {
            continue;
        };
        let slot = if &caps[1] == "1" { 0 } else { 1 };
        if numbered[slot].is_none() {
            numbered[slot] = Some(caps[2].trim().to_owned());
        }
    }

    if let [Some(first), Some(second)] = numbered {
        return [format!("1. {first}"), format!("2. {second}")];
    }

    let lines: Vec<String> = text
        .lines()
        .map(|line| strip_leading_marker(&strip_markup(line)).trim().to_owned())
        .filter(|line| line.chars().any(char::is_alphanumeric))
        .take(2)
        .collect();

    match lines.as_slice() {
        [first, second] => [format!("1. {first}"), format!("2. {second}")],
        _ => PLACEHOLDER_CHOICES.map(str::to_owned),
    }
}

/// Strips the `1. ` / `2. ` prefix from a choice for display next to a
/// reaction emoji.
#[must_use]
pub fn choice_text(choice: &str) -> &str {
    choice
        .strip_prefix("1. ")
        .or_else(|| choice.strip_prefix("2. "))
        .unwrap_or(choice)
}
