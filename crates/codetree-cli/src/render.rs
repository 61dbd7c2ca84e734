//! Text rendering of the tree view.

use codetree_core::{NodeView, TreeState};
use codetree_model::Selection;

/// How the outline is drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Label nodes with their full code (`A-01`) instead of the segment.
    pub full_codes: bool,
    /// Ignore collapsed nodes and print every node.
    pub show_all: bool,
}

/// Checkbox glyph for a selection state.
pub fn glyph(selection: Selection) -> &'static str {
    match selection {
        Selection::Unchecked => "[ ]",
        Selection::Checked => "[x]",
        Selection::Indeterminate => "[-]",
    }
}

/// One row per node, indented by depth.
///
/// ```text
/// v [-] A (level 1)
///   > [x] 01 (level 2)
///     [ ] 02 (level 2) *
/// ```
///
/// `v` marks an open node, `>` a closed one, leaves get no marker; `*`
/// marks annotated nodes.
pub fn render_outline(state: &TreeState, options: RenderOptions) -> String {
    let rows = if options.show_all {
        state.nodes()
    } else {
        state.visible_nodes()
    };
    rows.iter()
        .map(|row| render_row(row, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(row: &NodeView<'_>, options: RenderOptions) -> String {
    let indent = "  ".repeat(row.depth.saturating_sub(1));
    let marker = if row.is_leaf() {
        ' '
    } else if row.expanded {
        'v'
    } else {
        '>'
    };
    let label = if options.full_codes {
        row.path.to_code()
    } else {
        row.key.to_string()
    };
    let annotated = if row.annotated { " *" } else { "" };
    format!(
        "{indent}{marker} {} {label} (level {}){annotated}",
        glyph(row.selection),
        row.depth
    )
}
