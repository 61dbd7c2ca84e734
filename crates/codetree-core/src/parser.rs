//! Segment parser: raw cells to segment sequences.

use codetree_model::{NodePath, SEGMENT_DELIMITER};
use tracing::{debug, warn};

/// Outcome of parsing a batch of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCodes {
    /// Codes in input order, duplicates kept.
    pub codes: Vec<NodePath>,
    /// Number of cells read.
    pub cells: usize,
    /// Non-blank lines that produced no segment (e.g. `"--"`).
    pub discarded: usize,
}

/// Parse one line into a path.
///
/// Splits on the delimiter, trims each piece and drops empty pieces, so
/// `" A - 01 -"` becomes `A-01`. Returns `None` when nothing is left.
pub fn parse_code(line: &str) -> Option<NodePath> {
    let segments: Vec<String> = line
        .split(SEGMENT_DELIMITER)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(NodePath::from_segments(segments))
    }
}

/// Parse a cell that may hold several codes on separate lines.
///
/// Blank lines are skipped; lines with no usable segment are dropped.
pub fn parse_cell(cell: &str) -> Vec<NodePath> {
    let mut codes = Vec::new();
    parse_cell_into(cell, &mut codes);
    codes
}

/// Parse a batch of cells. A bad line never aborts the batch.
pub fn parse_cells<I, S>(cells: I) -> ParsedCodes
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedCodes::default();
    for cell in cells {
        parsed.cells += 1;
        parsed.discarded += parse_cell_into(cell.as_ref(), &mut parsed.codes);
    }
    debug!(
        cells = parsed.cells,
        codes = parsed.codes.len(),
        discarded = parsed.discarded,
        "parsed code cells"
    );
    parsed
}

/// Returns the number of non-blank lines that were dropped.
fn parse_cell_into(cell: &str, codes: &mut Vec<NodePath>) -> usize {
    let mut discarded = 0;
    for line in cell.split(['\n', '\r']) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_code(line) {
            Some(code) => codes.push(code),
            None => {
                warn!(line = %line.trim(), "dropping code with no segments");
                discarded += 1;
            }
        }
    }
    discarded
}
