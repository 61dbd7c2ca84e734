//! Document loading operations.

use std::fs;
use std::path::Path;

use codetree_core::TreeState;
use codetree_model::DepthBounds;

use crate::document::Document;
use crate::error::{PersistenceError, Result};

/// Load and structurally check a saved document.
pub fn load_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let document = Document::from_json(&bytes)?;
    tracing::info!("loaded tree from {}", path.display());
    Ok(document)
}

/// Load a saved document and rebuild the state it describes.
pub fn load_state(path: &Path, bounds: DepthBounds) -> Result<TreeState> {
    load_document(path)?.restore(bounds)
}
