//! Five-digit ZIP codes.

use std::fmt;

use serde::Serialize;

/// A US ZIP code held as text so leading zeros survive (`"02138"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Accepts exactly five ASCII digits: no sign, no whitespace, no ZIP+4.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == 5 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
