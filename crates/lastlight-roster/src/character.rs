//! Character reference type.

use std::fmt;

use serde::Serialize;

/// Gender as written into generation prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Non-binary.
    NonBinary,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::NonBinary => "non-binary",
        };
        f.write_str(label)
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    /// Full name; the unique key used everywhere else.
    pub name: &'static str,
    /// Age in years.
    pub age: u8,
    /// Gender.
    pub gender: Gender,
    /// Personality traits, most defining first.
    pub traits: &'static [&'static str],
    /// Full names of siblings in the catalog.
    pub siblings: &'static [&'static str],
    /// Characters this one tends to bond with.
    pub likely_pairs: &'static [&'static str],
    /// Characters this one tends to clash with.
    pub likely_conflicts: &'static [&'static str],
}

impl Character {
    /// The first whitespace-separated word of the name.
    #[must_use]
    pub fn first_name(&self) -> &'static str {
        self.name.split_whitespace().next().unwrap_or(self.name)
    }

    /// One-line prompt description, e.g. `Jordan (22, male): loyal, reckless`.
    #[must_use]
    pub fn prompt_line(&self) -> String {
        let mut line = format!("{} ({}, {})", self.name, self.age, self.gender);
        if !self.traits.is_empty() {
            line.push_str(": ");
            line.push_str(&self.traits.join(", "));
        }
        if !self.siblings.is_empty() {
            line.push_str(&format!("; sibling of {}", self.siblings.join(", ")));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Character {
        Character {
            name: "Ella Muy",
            age: 21,
            gender: Gender::Female,
            traits: &["calm", "observant"],
            siblings: &["Vivian Muy"],
            likely_pairs: &[],
            likely_conflicts: &[],
        }
    }

    #[test]
    fn test_first_name_takes_leading_word() {
        assert_eq!(sample().first_name(), "Ella");
    }

    #[test]
    fn test_prompt_line_lists_traits_and_siblings() {
        assert_eq!(
            sample().prompt_line(),
            "Ella Muy (21, female): calm, observant; sibling of Vivian Muy"
        );
    }
}
