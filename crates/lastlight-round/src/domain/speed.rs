//! Pacing multiplier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How fast phases follow each other. Serialized as the bare multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum Speed {
    /// 1x, the default.
    #[default]
    Normal,
    /// 1.5x.
    Fast,
    /// 2x.
    Fastest,
}

impl Speed {
    /// Every accepted speed, slowest first.
    pub const ALL: [Self; 3] = [Self::Normal, Self::Fast, Self::Fastest];

    /// Maps a multiplier to a speed. Anything other than 1.0, 1.5 or 2.0
    /// (including NaN) normalizes to [`Speed::Normal`].
    #[must_use]
    pub fn from_multiplier(multiplier: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|speed| (speed.multiplier() - multiplier).abs() < f64::EPSILON)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Fast => 1.5,
            Self::Fastest => 2.0,
        }
    }
}

impl From<f64> for Speed {
    fn from(value: f64) -> Self {
        Self::from_multiplier(value)
    }
}

impl From<Speed> for f64 {
    fn from(value: Speed) -> Self {
        value.multiplier()
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}
