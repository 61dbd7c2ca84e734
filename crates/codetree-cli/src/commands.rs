use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span, warn};

use codetree_cli::input::read_cells;
use codetree_cli::render::{RenderOptions, render_outline};
use codetree_core::{DepthSummary, EngineConfig, IngestSummary, TreeState, parse_code};
use codetree_model::NodePath;
use codetree_persistence::{load_document, save_state};

use crate::cli::{DisplayArgs, ShowArgs, SummaryArgs, TreeArgs, ViewArgs};

/// What the `summary` command prints.
pub struct SummaryReport {
    pub ingest: IngestSummary,
    pub levels: Vec<DepthSummary>,
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load_from(path).context("load engine config"),
        None => Ok(EngineConfig::default()),
    }
}

pub fn run_tree(args: &TreeArgs, config: &EngineConfig) -> Result<String> {
    let span = info_span!("tree", input = %args.input.display());
    let _guard = span.enter();

    let mut state = TreeState::new(config);
    ingest(&mut state, &args.input, args.max_depth, config)?;

    if let Some(document) = &args.restore {
        restore_onto(&mut state, document)?;
    }

    apply_display(&mut state, &args.display)?;

    for code in &args.check {
        state.set_checked(&node_path(code)?, true)?;
    }
    for code in &args.uncheck {
        state.set_checked(&node_path(code)?, false)?;
    }
    for code in &args.toggle {
        let selection = state.toggle(&node_path(code)?)?;
        debug!(code = %code, selection = selection.label(), "toggled node");
    }
    if args.toggle_all {
        state.toggle_all();
    }
    if !args.annotate.is_empty() {
        let paths = args
            .annotate
            .iter()
            .map(String::as_str)
            .map(node_path)
            .collect::<Result<Vec<_>>>()?;
        state.toggle_annotations(paths)?;
    }

    if let Some(path) = &args.save {
        save_state(&state, path)?;
        info!(path = %path.display(), "saved tree");
    }

    if args.checked_only {
        let codes: Vec<String> = state
            .checked_leaves()
            .iter()
            .map(NodePath::to_code)
            .collect();
        return Ok(codes.join("\n"));
    }
    Ok(render_outline(&state, render_options(&args.view)))
}

pub fn run_show(args: &ShowArgs, config: &EngineConfig) -> Result<String> {
    let mut state = load_document(&args.document)?.restore(config.bounds)?;
    apply_display(&mut state, &args.display)?;
    Ok(render_outline(&state, render_options(&args.view)))
}

pub fn run_summary(args: &SummaryArgs, config: &EngineConfig) -> Result<SummaryReport> {
    let mut state = TreeState::new(config);
    let ingest = ingest(&mut state, &args.input, args.max_depth, config)?;
    if let Some(document) = &args.restore {
        restore_onto(&mut state, document)?;
    }
    Ok(SummaryReport {
        ingest,
        levels: state.depth_summary(),
    })
}

fn ingest(
    state: &mut TreeState,
    input: &Path,
    max_depth: Option<usize>,
    config: &EngineConfig,
) -> Result<IngestSummary> {
    let cells = read_cells(input)?;
    let max_depth = max_depth.or(config.tree.max_depth);
    let summary = state
        .ingest(&cells, max_depth)
        .context("build code tree")?;
    if let Some(error) = summary.empty_input() {
        warn!("{error}");
    }
    Ok(summary)
}

/// Lay a saved document's selection, annotations and display over `state`.
fn restore_onto(state: &mut TreeState, document: &Path) -> Result<()> {
    let summary = load_document(document)?
        .apply_to(state)
        .with_context(|| format!("apply {}", document.display()))?;
    if summary.dropped > 0 {
        warn!(
            dropped = summary.dropped,
            "saved entries do not match any node in the new tree"
        );
    }
    Ok(())
}

/// Depth flags outside the configured bounds are clamped, not rejected.
fn apply_display(state: &mut TreeState, args: &DisplayArgs) -> Result<()> {
    let bounds = state.bounds();
    if let Some(depth) = args.depth {
        let clamped = bounds.clamp(depth);
        if usize::from(clamped) != depth {
            warn!(requested = depth, depth = clamped, "clamped display depth");
        }
        state.set_display_depth(usize::from(clamped))?;
    }
    if let Some(threshold) = args.threshold {
        let clamped = bounds.clamp(threshold);
        if usize::from(clamped) != threshold {
            warn!(requested = threshold, threshold = clamped, "clamped collapse threshold");
        }
        state.set_collapse_threshold(usize::from(clamped))?;
    }
    if args.expand_all {
        state.expand_all();
    } else if args.collapse_all {
        state.collapse_all();
    }
    Ok(())
}

/// Codes on the command line get the same cleanup as input lines.
fn node_path(code: &str) -> Result<NodePath> {
    parse_code(code).ok_or_else(|| anyhow!("'{code}' is not a valid code"))
}

fn render_options(args: &ViewArgs) -> RenderOptions {
    RenderOptions {
        full_codes: args.full_codes,
        show_all: args.show_all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_summary_counts_restored_state() {
        let dir = tempdir().unwrap();
        let codes = dir.path().join("codes.txt");
        let saved = dir.path().join("tree.json");
        fs::write(&codes, "A-01-X\nA-01-Y\nA-02-X\n").unwrap();

        let mut state = TreeState::default();
        state.ingest(["A-01-X", "A-01-Y", "A-02-X"], None).unwrap();
        state
            .set_checked(&"A-01".parse().unwrap(), true)
            .unwrap();
        state
            .toggle_annotations(["A-02-X".parse::<NodePath>().unwrap()])
            .unwrap();
        save_state(&state, &saved).unwrap();

        let args = SummaryArgs {
            input: codes,
            max_depth: None,
            restore: Some(saved),
        };
        let report = run_summary(&args, &EngineConfig::default()).unwrap();
        let checked: Vec<usize> = report.levels.iter().map(|l| l.checked).collect();
        let partial: Vec<usize> = report.levels.iter().map(|l| l.indeterminate).collect();
        let annotated: Vec<usize> = report.levels.iter().map(|l| l.annotated).collect();
        assert_eq!(checked, [0, 1, 2]);
        assert_eq!(partial, [1, 0, 0]);
        assert_eq!(annotated, [0, 0, 1]);
    }

    #[test]
    fn test_summary_without_restore_has_no_selection() {
        let dir = tempdir().unwrap();
        let codes = dir.path().join("codes.txt");
        fs::write(&codes, "A-01\nB\n").unwrap();

        let args = SummaryArgs {
            input: codes,
            max_depth: None,
            restore: None,
        };
        let report = run_summary(&args, &EngineConfig::default()).unwrap();
        assert_eq!(report.ingest.nodes, 3);
        assert!(report.levels.iter().all(|l| l.checked == 0));
    }
}
