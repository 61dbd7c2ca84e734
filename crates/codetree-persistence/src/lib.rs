//! Persistent storage for code trees.
//!
//! A saved document holds the tree shape, the selection and annotation state
//! keyed by path, and the display settings. Paths are the only identity used,
//! so a document can be laid over a tree rebuilt from a different batch of
//! codes.
//!
//! # File Format
//!
//! Pretty-printed JSON with four top-level fields:
//!
//! ```text
//! {
//!   "structure": [{ "key": "A", "expanded": true, "children": [...] }],
//!   "selection": { "A": "indeterminate", "A-01": "checked" },
//!   "annotated": ["A-01"],
//!   "displaySettings": { "depth": 2, "collapseThreshold": 1 }
//! }
//! ```
//!
//! There is no version field; anything that does not match this shape is
//! rejected as malformed.
//!
//! # Example
//!
//! ```ignore
//! use codetree_persistence::{Document, load_document, save_document};
//!
//! save_document(&Document::capture(&state), Path::new("tree.json"))?;
//!
//! let restored = load_document(Path::new("tree.json"))?.restore(state.bounds())?;
//! ```

mod codec;
mod document;
mod error;
mod io;

pub use document::{Document, NodeRecord};
pub use error::{PersistenceError, Result};
pub use io::{load_document, load_state, save_document, save_state};
