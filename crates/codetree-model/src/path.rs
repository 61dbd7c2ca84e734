//! Stable node identity.
//!
//! A [`NodePath`] is the full ordered sequence of segments from a root to a
//! node. It is the only identity that survives a tree rebuild, so every
//! persisted per-node state is keyed by it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Character separating the segments of a code.
pub const SEGMENT_DELIMITER: char = '-';

/// Why a string is not a valid path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("path has no segments")]
    Empty,

    #[error("invalid segment '{segment}' (segments must be non-empty and trimmed)")]
    InvalidSegment { segment: String },
}

/// Ordered segment sequence identifying one node.
///
/// Ordering is lexicographic by segment, which is also the pre-order of a tree
/// whose siblings are sorted by key: `A` < `A-01` < `A-01-X` < `A-02` < `B`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// Build a path from already-normalized segments.
    ///
    /// Callers are expected to pass at least one trimmed, non-empty segment
    /// without delimiters; use [`NodePath::new`] when that is not known.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        debug_assert!(!segments.is_empty(), "node paths are never empty");
        Self { segments }
    }

    /// Build a path, checking every segment.
    pub fn new(segments: Vec<String>) -> Result<Self, PathParseError> {
        if segments.is_empty() {
            return Err(PathParseError::Empty);
        }
        if let Some(bad) = segments.iter().find(|s| !is_valid_segment(s)) {
            return Err(PathParseError::InvalidSegment {
                segment: bad.clone(),
            });
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// 1-based distance from the root set.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Last segment: the node's key among its siblings.
    pub fn key(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Path of the parent node, `None` for a root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Path of a direct child with the given key.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> NodePath {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    /// True if `self` equals `other` or is one of its ancestors.
    pub fn is_prefix_of(&self, other: &NodePath) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// The code form, segments joined by [`SEGMENT_DELIMITER`].
    pub fn to_code(&self) -> String {
        self.segments.join(&SEGMENT_DELIMITER.to_string())
    }
}

/// A segment is usable in a path if it is non-empty, trimmed and free of the
/// delimiter. The delimiter rule keeps the code form unambiguous.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.trim() == segment && !segment.contains(SEGMENT_DELIMITER)
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}

impl FromStr for NodePath {
    type Err = PathParseError;

    /// Strict parse of the code form. Unlike ingestion, nothing is trimmed or
    /// dropped: `A--B` and ` A` are errors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }
        Self::new(s.split(SEGMENT_DELIMITER).map(str::to_string).collect())
    }
}

impl TryFrom<String> for NodePath {
    type Error = PathParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.to_code()
    }
}
