//! Dotted field paths into a resource document.
//!
//! A path such as `attributes.address.city` is stored as its segments so
//! callers never split strings by hand. Numeric segments address array
//! elements when the value at that level is an array.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

const SEPARATOR: char = '.';

/// A validated, non-empty sequence of non-empty path segments.
///
/// Ordering is segment-wise lexicographic, which gives overlays keyed by
/// `FieldPath` a stable iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Parses a dotted path.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s.is_empty() {
            return Err(Error::InvalidPath {
                path: s.to_string(),
                reason: "path is empty",
            });
        }
        let segments: Vec<String> = s.split(SEPARATOR).map(str::to_string).collect();
        Self::from_segments(segments).map_err(|_| Error::InvalidPath {
            path: s.to_string(),
            reason: "path contains an empty segment",
        })
    }

    /// Builds a path from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(Error::InvalidPath {
                path: String::new(),
                reason: "path is empty",
            });
        }
        if let Some(bad) = segments
            .iter()
            .find(|seg| seg.is_empty() || seg.contains(SEPARATOR))
        {
            return Err(Error::InvalidPath {
                path: segments.join("."),
                reason: if bad.is_empty() {
                    "path contains an empty segment"
                } else {
                    "segment contains the separator"
                },
            });
        }
        Ok(Self(segments))
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    /// The path truncated to its first `depth` segments, if it is that deep.
    pub fn prefix(&self, depth: usize) -> Option<Self> {
        (depth > 0 && depth <= self.0.len()).then(|| Self(self.0[..depth].to_vec()))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for FieldPath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}
