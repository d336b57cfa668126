//! Join keys shared by attribute rows and geometry records.
//!
//! A key is either an integer or a string. The two kinds never compare
//! equal: `JoinKey::Int(1)` does not match `JoinKey::Text("1")`. A table
//! whose keys were loaded as strings joined against geometry keyed by
//! integers therefore matches nothing, which the join reports as a
//! [`NoMatch`](crate::ShapejoinError::NoMatch) error rather than silently
//! coercing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value used to associate a tabular record with a spatial record.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinKey {
    Int(i64),
    Text(String),
}

/// How a raw key string should be interpreted when loading a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyKind {
    /// Integer when the string looks like one, text otherwise.
    #[default]
    Auto,
    /// Always an integer; non-integer strings are rejected.
    Int,
    /// Always text, never parsed.
    Text,
}

impl JoinKey {
    /// Parses a raw key string according to `kind`.
    ///
    /// Returns `None` only for [`KeyKind::Int`] when the string is not an
    /// integer. Surrounding whitespace is trimmed before parsing.
    pub fn parse(raw: &str, kind: KeyKind) -> Option<Self> {
        let trimmed = raw.trim();
        match kind {
            KeyKind::Text => Some(JoinKey::Text(trimmed.to_string())),
            KeyKind::Int => trimmed.parse::<i64>().ok().map(JoinKey::Int),
            KeyKind::Auto => Some(
                trimmed
                    .parse::<i64>()
                    .map(JoinKey::Int)
                    .unwrap_or_else(|_| JoinKey::Text(trimmed.to_string())),
            ),
        }
    }
}

impl fmt::Debug for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKey::Int(v) => write!(f, "JoinKey({})", v),
            JoinKey::Text(s) => write!(f, "JoinKey({:?})", s),
        }
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKey::Int(v) => write!(f, "{}", v),
            JoinKey::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for JoinKey {
    fn from(v: i64) -> Self {
        JoinKey::Int(v)
    }
}

impl From<&str> for JoinKey {
    fn from(s: &str) -> Self {
        JoinKey::Text(s.to_string())
    }
}

impl From<String> for JoinKey {
    fn from(s: String) -> Self {
        JoinKey::Text(s)
    }
}
