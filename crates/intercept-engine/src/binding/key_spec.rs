use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Which key identifiers a key binding responds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySpec {
    /// One key, compared case-insensitively.
    Single(String),
    /// Any of these keys, compared case-sensitively.
    AnyOf(BTreeSet<String>),
}

impl KeySpec {
    pub fn single(key: impl Into<String>) -> Self {
        Self::Single(key.into())
    }

    pub fn any_of<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyOf(keys.into_iter().map(Into::into).collect())
    }

    /// Resolve into a predicate. Done once per binding, not per event.
    pub fn predicate(&self) -> KeyPredicate {
        match self {
            Self::Single(key) => KeyPredicate::Single(key.to_lowercase()),
            Self::AnyOf(keys) => KeyPredicate::AnyOf(keys.clone()),
        }
    }

    /// Key identifiers in declaration order (sorted for sets).
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Single(key) => vec![key.as_str()],
            Self::AnyOf(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}

/// Key test derived from a [`KeySpec`].
///
/// Single keys compare case-insensitively, sets compare exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPredicate {
    /// Holds the lowercased key.
    Single(String),
    AnyOf(BTreeSet<String>),
}

impl KeyPredicate {
    pub fn test(&self, key: &str) -> bool {
        match self {
            Self::Single(lowered) => key.to_lowercase() == *lowered,
            Self::AnyOf(keys) => keys.contains(key),
        }
    }
}
