//! Source location tracking

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A byte range inside one of the compiler's input files, written
/// `offset:length:sourceIndex` in the JSON form.
///
/// A source index of `-1` marks a node that does not come from any file,
/// which is what synthesized declarations carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceRange {
    pub offset: usize,
    pub length: usize,
    pub source_index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed source range `{0}`")]
pub struct SourceRangeError(pub String);

impl SourceRange {
    pub fn new(offset: usize, length: usize, source_index: i64) -> Self {
        Self { offset, length, source_index }
    }

    /// The `0:0:-1` range given to nodes that have no source text.
    pub fn synthetic() -> Self {
        Self { offset: 0, length: 0, source_index: -1 }
    }

    pub fn is_synthetic(&self) -> bool {
        self.source_index < 0
    }

    /// Byte offset one past the last covered byte
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn contains(&self, other: &SourceRange) -> bool {
        self.source_index == other.source_index
            && self.offset <= other.offset
            && other.end() <= self.end()
    }

    /// Move the range by `delta` bytes, clamping at the start of the file.
    /// The length is never touched.
    pub fn shifted(self, delta: i64) -> Self {
        let offset = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.offset.saturating_add(delta as usize)
        };
        Self { offset, ..self }
    }
}

impl Default for SourceRange {
    fn default() -> Self {
        Self::synthetic()
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.length, self.source_index)
    }
}

impl FromStr for SourceRange {
    type Err = SourceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::synthetic());
        }
        let malformed = || SourceRangeError(s.to_string());
        let mut parts = s.split(':');
        let offset = parts.next().and_then(|p| p.parse().ok()).ok_or_else(malformed)?;
        let length = parts.next().and_then(|p| p.parse().ok()).ok_or_else(malformed)?;
        let source_index = parts.next().and_then(|p| p.parse().ok()).ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(Self { offset, length, source_index })
    }
}

impl TryFrom<String> for SourceRange {
    type Error = SourceRangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceRange> for String {
    fn from(range: SourceRange) -> Self {
        range.to_string()
    }
}
