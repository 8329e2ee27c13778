//! Feature tags

use std::fmt;

/// Computes the integer key-code of a tag key.
///
/// The code is the classic 31-multiplier string hash over UTF-16 code units,
/// so it is stable across processes and matches codes stored with map data.
pub fn key_code(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// A key/value pair attached to a map feature.
///
/// Tags carry the key-code of their key from load time so that caption
/// lookups compare integers instead of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub key: String,
    pub value: String,
    pub key_code: i32,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let key_code = key_code(&key);
        Self {
            key,
            value: value.into(),
            key_code,
        }
    }

    /// Parses a `key=value` pair. Returns `None` when there is no `=`.
    pub fn parse(pair: &str) -> Option<Self> {
        let (key, value) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key, value.trim()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
