//! File I/O operations for saved trees.
//!
//! This module handles:
//! - Saving documents with atomic writes
//! - Loading documents with structural validation

mod load;
mod save;

pub use load::{load_document, load_state};
pub use save::{save_document, save_state};
