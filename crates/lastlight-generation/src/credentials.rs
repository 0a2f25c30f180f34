//! Credential pool bookkeeping.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// An API key with a log-safe label.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    label: String,
    secret: String,
}

impl Credential {
    /// Creates a credential.
    #[must_use]
    pub fn new(label: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            secret: secret.into(),
        }
    }

    /// Builds a pool from raw keys, labelled `key-1`, `key-2`, … in order.
    /// Blank entries are dropped.
    #[must_use]
    pub fn pool_from_keys<I, S>(keys: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| key.as_ref().trim().to_owned())
            .filter(|key| !key.is_empty())
            .enumerate()
            .map(|(i, key)| Self::new(format!("key-{}", i + 1), key))
            .collect()
    }

    /// Label used in logs.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The raw secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("label", &self.label)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Expiry times of parked credentials, keyed by label.
#[derive(Debug, Default)]
pub(crate) struct CooldownTable {
    until: HashMap<String, DateTime<Utc>>,
}

impl CooldownTable {
    /// Whether `label` is still parked at `now`. Expired entries are purged.
    pub(crate) fn is_cooling(&mut self, label: &str, now: DateTime<Utc>) -> bool {
        match self.until.get(label) {
            Some(until) if *until > now => true,
            Some(_) => {
                self.until.remove(label);
                false
            }
            None => false,
        }
    }

    /// Parks `label` until `now + period`.
    pub(crate) fn park(&mut self, label: &str, now: DateTime<Utc>, period: Duration) {
        self.until.insert(label.to_owned(), now + period);
    }

    /// When `label` becomes usable again, if parked.
    pub(crate) fn until(&self, label: &str) -> Option<DateTime<Utc>> {
        self.until.get(label).copied()
    }
}
