//! Small text utilities shared by the extractors.

use lastlight_roster::Roster;

/// Characters accepted as a leading bullet marker.
const BULLET_MARKERS: [char; 5] = ['•', '-', '–', '—', '·'];

/// Splits text into sentence-ish windows on terminal punctuation, semicolons
/// and line breaks. Empty windows are dropped.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', ';', '\n', '…'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercased word tokens with possessive suffixes removed.
pub(crate) fn words(sentence: &str) -> Vec<String> {
    strip_markup(sentence)
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}' || c == '-'))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '\u{2019}' || c == '-'))
        .filter(|w| !w.is_empty())
        .map(|w| {
            let lower = w.to_lowercase();
            lower
                .strip_suffix("'s")
                .or_else(|| lower.strip_suffix("\u{2019}s"))
                .map_or_else(|| lower.clone(), str::to_owned)
        })
        .collect()
}

/// A character mention located in a token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenMention {
    /// Index of the first token of the mention.
    pub start: usize,
    /// One past the last token.
    pub end: usize,
    /// Canonical full name.
    pub name: &'static str,
}

/// Finds character mentions in `tokens`, longest pattern first so that a
/// full name is never also counted as its first name.
pub(crate) fn mentions_in(tokens: &[String], roster: &Roster) -> Vec<TokenMention> {
    let mut taken = vec![false; tokens.len()];
    let mut found = Vec::new();

    for mention in roster.mentions() {
        let pattern: Vec<String> = mention
            .pattern
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if pattern.is_empty() || pattern.len() > tokens.len() {
            continue;
        }
        for start in 0..=tokens.len() - pattern.len() {
            let end = start + pattern.len();
            if taken[start..end].iter().any(|t| *t) {
                continue;
            }
            if tokens[start..end] == pattern[..] {
                taken[start..end].iter_mut().for_each(|t| *t = true);
                found.push(TokenMention {
                    start,
                    end,
                    name: mention.name,
                });
            }
        }
    }

    found.sort_by_key(|m| m.start);
    found
}

/// Removes bold/italic/code markup.
pub(crate) fn strip_markup(line: &str) -> String {
    line.replace("**", "")
        .replace("__", "")
        .replace('`', "")
}

/// Strips any leading bullet markers, `* ` markers, heading hashes and
/// `1.` / `1)` numbering.
pub(crate) fn strip_leading_marker(line: &str) -> &str {
    let mut rest = line.trim_start();
    loop {
        let before = rest;
        if let Some(stripped) = rest.strip_prefix(BULLET_MARKERS) {
            rest = stripped.trim_start();
        } else if let Some(stripped) = rest.strip_prefix("* ") {
            rest = stripped.trim_start();
        } else if rest.starts_with('#') {
            rest = rest.trim_start_matches('#').trim_start();
        } else if let Some(stripped) = strip_numbering(rest) {
            rest = stripped;
        }
        if rest.len() == before.len() {
            return rest;
        }
    }
}

/// Strips `N.` or `N)` followed by whitespace.
fn strip_numbering(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 2 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix(['.', ')'])?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Whether the line starts with a bullet or numbering marker.
pub(crate) fn has_leading_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    strip_leading_marker(trimmed).len() != trimmed.len()
}

/// Keeps at most `limit` whitespace-separated words.
pub(crate) fn first_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps the last `limit` characters of `text`.
#[must_use]
pub fn tail_chars(text: &str, limit: usize) -> &str {
    let count = text.chars().count();
    if count <= limit {
        return text;
    }
    let skip = count - limit;
    let offset = text
        .char_indices()
        .nth(skip)
        .map_or(text.len(), |(i, _)| i);
    &text[offset..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_split_on_punctuation_and_newlines() {
        let parts = sentences("Run! Where? Over there.\nNow; quickly");

        assert_eq!(parts, vec!["Run", "Where", "Over there", "Now", "quickly"]);
    }

    #[test]
    fn test_words_lowercase_and_drop_possessives() {
        assert_eq!(
            words("**Jordan**'s hand, Ella’s knife"),
            vec!["jordan", "hand", "ella", "knife"]
        );
    }

    #[test]
    fn test_mentions_prefer_full_names() {
        let roster = Roster::standard();
        let tokens = words("Ella Muy waves at Ella and Jordan");

        let found = mentions_in(&tokens, roster);

        let names: Vec<_> = found.iter().map(|m| (m.start, m.name)).collect();
        assert_eq!(
            names,
            vec![(0, "Ella Muy"), (4, "Ella Muy"), (6, "Jordan")]
        );
        assert_eq!(found[0].end, 2);
    }

    #[test]
    fn test_strip_leading_marker_variants() {
        assert_eq!(strip_leading_marker("• - text"), "text");
        assert_eq!(strip_leading_marker("* text"), "text");
        assert_eq!(strip_leading_marker("12) text"), "text");
        assert_eq!(strip_leading_marker("## 1. text"), "text");
        assert_eq!(strip_leading_marker("**Bold** text"), "**Bold** text");
        assert_eq!(strip_leading_marker("3 zombies"), "3 zombies");
    }

    #[test]
    fn test_tail_chars_keeps_suffix_on_char_boundary() {
        assert_eq!(tail_chars("abcdef", 3), "def");
        assert_eq!(tail_chars("ab", 3), "ab");
        assert_eq!(tail_chars("héllo", 4), "éllo");
    }

    #[test]
    fn test_first_words_truncates() {
        assert_eq!(first_words("one two  three four", 2), "one two");
    }
}
