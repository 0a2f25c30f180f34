//! Bullet normalization and name emphasis.

use lastlight_roster::Roster;
use regex::Regex;

use crate::text::{strip_leading_marker, strip_markup};

/// Prefix of every normalized statement.
pub const BULLET: &str = "• ";

const TERMINAL: [char; 4] = ['.', '!', '?', '…'];
const CLOSERS: [char; 8] = ['"', '\'', '\u{201d}', '\u{2019}', ')', ']', '*', '_'];

/// Turns free text into bullet statements.
///
/// Each output line starts with exactly one `• ` and ends with terminal
/// punctuation. Existing markers and numbering are stripped, inline `•`
/// separators split a line, lines without any letters or digits are dropped,
/// and consecutive duplicates collapse. Applying this to its own output is a
/// no-op.
#[must_use]
pub fn normalize_bullets(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for raw_line in text.lines() {
        for piece in raw_line.split('•') {
            let body = strip_leading_marker(piece).trim();
            if !body.chars().any(char::is_alphanumeric) {
                continue;
            }
            let statement = format!("{BULLET}{}", terminate(body));
            if out.last() != Some(&statement) {
                out.push(statement);
            }
        }
    }

    out
}

/// Appends a period unless the text already ends in terminal punctuation,
/// looking through trailing quotes, brackets and emphasis.
fn terminate(body: &str) -> String {
    let inner = body.trim_end_matches(CLOSERS);
    if inner.ends_with(TERMINAL) {
        body.to_owned()
    } else {
        format!("{body}.")
    }
}

/// Bolds character names in text.
///
/// Full names and unique first names are matched as whole words, longest
/// first, so `Ella Muy` is never split into `**Ella** Muy`. A possessive
/// suffix stays outside the emphasis: `**Jordan**'s`.
#[derive(Debug, Clone)]
pub struct NameHighlighter {
    pattern: Option<Regex>,
}

impl NameHighlighter {
    /// Builds a highlighter for every name in `roster`.
    #[must_use]
    pub fn new(roster: &Roster) -> Self {
        let alternatives: Vec<String> = roster
            .mentions()
            .iter()
            .map(|m| regex::escape(m.pattern))
            .collect();
        if alternatives.is_empty() {
            return Self { pattern: None };
        }
        let source = format!(r"\b(?:{})\b", alternatives.join("|"));
        // Built from escaped literals only.
        let pattern = Regex::new(&source).ok();
        Self { pattern }
    }

    /// Returns `line` with every name wrapped in `**`. Existing bold markup
    /// is removed first so repeated application is stable.
    #[must_use]
    pub fn emphasize(&self, line: &str) -> String {
        let plain = line.replace("**", "");
        match &self.pattern {
            Some(pattern) => pattern.replace_all(&plain, "**$0**").into_owned(),
            None => plain,
        }
    }
}

/// Normalizes `text` into bullets and emphasizes names in each.
#[must_use]
pub fn format_narration(text: &str, highlighter: &NameHighlighter) -> Vec<String> {
    normalize_bullets(&strip_markup(text))
        .iter()
        .map(|line| highlighter.emphasize(line))
        .collect()
}
