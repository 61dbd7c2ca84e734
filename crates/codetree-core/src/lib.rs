//! Hierarchical code tree engine.
//!
//! Turns a flat list of hyphen-delimited codes (`A-12-03`) into a prefix tree
//! and keeps the interactive state a tree view needs: tri-state checkboxes
//! with parent/child propagation, open/closed flags, and highlight
//! annotations.
//!
//! # Example
//!
//! ```
//! use codetree_core::{EngineConfig, TreeState};
//! use codetree_model::{NodePath, Selection};
//!
//! let mut state = TreeState::new(&EngineConfig::default());
//! state.ingest(["A-01-X", "A-01-Y", "A-02-X"], None).unwrap();
//!
//! state.set_checked(&NodePath::from_segments(["A", "01"]), true).unwrap();
//! let a = state.tree().get(&NodePath::from_segments(["A"])).unwrap();
//! assert_eq!(a.selection(), Selection::Indeterminate);
//! ```
//!
//! # Architecture
//!
//! - `parser` - raw cells to segment sequences
//! - `builder` - segment sequences to a [`Tree`]
//! - `selection` - downward cascade and upward recomputation
//! - `visibility` - depth projection and threshold expand/collapse
//! - `annotation` - highlight set keyed by path
//! - `state` - [`TreeState`], the engine instance tying them together
//! - `view` - read-only traversal for renderers

mod annotation;
mod builder;
mod config;
mod parser;
mod selection;
mod state;
mod tree;
mod view;
mod visibility;

pub use annotation::AnnotationStore;
pub use builder::{TreeBuilder, build_tree};
pub use config::{ConfigError, DisplayConfig, EngineConfig, TreeConfig};
pub use parser::{ParsedCodes, parse_cell, parse_cells, parse_code};
pub use selection::{SelectionMap, inconsistent_nodes, selection_snapshot};
pub use state::{IngestSummary, OverlaySummary, TreeState};
pub use tree::{Node, Preorder, Tree};
pub use view::{DepthSummary, NodeView};

pub use codetree_model::{DepthBounds, DisplaySettings, NodePath, Selection, TreeError};
