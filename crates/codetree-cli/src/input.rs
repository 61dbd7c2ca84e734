//! Reading raw code cells.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Read cells from a text file, one cell per line. `-` reads stdin.
pub fn read_cells(path: &Path) -> Result<Vec<String>> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("read codes from stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("read codes from {}", path.display()))?
    };
    Ok(split_cells(&text))
}

/// One cell per line; a leading byte-order mark is ignored.
pub fn split_cells(text: &str) -> Vec<String> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .map(str::to_string)
        .collect()
}
