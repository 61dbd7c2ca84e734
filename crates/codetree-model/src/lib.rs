//! Shared data types for the code tree workspace.
//!
//! - [`NodePath`]: the ordered segment sequence that identifies a node
//! - [`Selection`]: tri-state checkbox value
//! - [`DisplaySettings`] and [`DepthBounds`]: depth knobs and their allowed range
//! - [`TreeError`]: conditions reported by tree operations

pub mod display;
pub mod error;
pub mod path;
pub mod selection;

pub use display::{DepthBounds, DisplaySettings};
pub use error::{Result, TreeError};
pub use path::{NodePath, PathParseError, SEGMENT_DELIMITER, is_valid_segment};
pub use selection::Selection;
