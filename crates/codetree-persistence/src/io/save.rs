//! Document saving operations.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use codetree_core::TreeState;

use crate::document::Document;
use crate::error::{PersistenceError, Result};

/// Save a document as JSON.
///
/// Uses atomic write (temp file + rename) so a crash never leaves a
/// half-written file behind.
pub fn save_document(document: &Document, path: &Path) -> Result<()> {
    let bytes = document.to_json()?;
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        nodes = document.selection.len(),
        "saved tree to {}",
        path.display()
    );
    Ok(())
}

/// Capture `state` and save it.
pub fn save_state(state: &TreeState, path: &Path) -> Result<()> {
    save_document(&Document::capture(state), path)
}

/// `tree.json` -> `tree.json.tmp`, next to the target.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
