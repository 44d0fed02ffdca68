use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::error::KeyGenError;

pub const SUFFIX_SEPARATOR: char = '-';

static KEY_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([0-9]+)-(.*)$").expect("serial key pattern compiles")
});

/// A formatted key: `{numeric portion}-{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialKey {
    value: String,
    numeric_len: usize,
}

impl SerialKey {
    pub(crate) fn from_parts(numeric: String, suffix: &str) -> Self {
        let numeric_len = numeric.len();
        let mut value = numeric;
        value.push(SUFFIX_SEPARATOR);
        value.push_str(suffix);
        SerialKey { value, numeric_len }
    }

    /// Parses a formatted key, splitting at the first separator.
    pub fn parse(value: &str) -> Result<Self, KeyGenError> {
        let captures = KEY_SHAPE.captures(value).ok_or_else(|| {
            KeyGenError::InvalidInput(format!(
                "{:?} is not of the form <digits>{}<suffix>",
                value, SUFFIX_SEPARATOR
            ))
        })?;
        let numeric_len = captures.get(1).map_or(0, |m| m.end());
        Ok(SerialKey {
            value: value.to_string(),
            numeric_len,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Prefix, random fill and check digit, without separator or suffix.
    pub fn numeric_portion(&self) -> &str {
        &self.value[..self.numeric_len]
    }

    pub fn suffix(&self) -> &str {
        &self.value[self.numeric_len + SUFFIX_SEPARATOR.len_utf8()..]
    }

    /// The numeric portion with every non-digit character stripped.
    pub fn numeric_digits(&self) -> String {
        self.numeric_portion()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }
}

impl fmt::Display for SerialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for SerialKey {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<String> for SerialKey {
    type Error = KeyGenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SerialKey::parse(&value)
    }
}

impl From<SerialKey> for String {
    fn from(key: SerialKey) -> Self {
        key.value
    }
}
