//! Error conditions raised by tree operations.

use thiserror::Error;

use crate::path::NodePath;

/// Conditions reported by the tree engine.
///
/// None of these leave the engine in a half-updated state: the operation that
/// reports one has not changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// No valid code survived parsing. The resulting tree is empty.
    #[error("no valid codes in input")]
    EmptyInput,

    /// An operation referenced a path that is not in the current tree.
    #[error("node not found: {path}")]
    NodeNotFound { path: NodePath },

    /// A depth value fell outside the configured range.
    #[error("depth {value} is outside the allowed range {min}..={max}")]
    DepthOutOfRange { value: usize, min: u8, max: u8 },

    /// A depth range that is empty, starts at zero or exceeds the ceiling.
    #[error("depth bounds {min}..={max} must satisfy 1 <= min <= max <= {ceiling}")]
    InvalidBounds { min: u8, max: u8, ceiling: u8 },
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
