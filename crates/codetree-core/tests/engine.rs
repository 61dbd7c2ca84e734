//! Scenario tests for the tree engine.

use std::collections::BTreeMap;

use codetree_core::{EngineConfig, SelectionMap, TreeState, inconsistent_nodes};
use codetree_model::{DepthBounds, DisplaySettings, NodePath, Selection, TreeError};

fn path(code: &str) -> NodePath {
    code.parse().expect("valid path")
}

fn state_with(codes: &[&str]) -> TreeState {
    let mut state = TreeState::default();
    state.ingest(codes, None).expect("ingest");
    state
}

fn selection(state: &TreeState, code: &str) -> Selection {
    state
        .tree()
        .get(&path(code))
        .expect("node exists")
        .selection()
}

#[test]
fn checking_two_leaves_checks_parent_only() {
    let mut state = state_with(&["A-01-X", "A-01-Y", "A-02-X"]);
    state.set_checked(&path("A-01-X"), true).unwrap();
    state.set_checked(&path("A-01-Y"), true).unwrap();

    assert_eq!(selection(&state, "A-01"), Selection::Checked);
    assert_eq!(selection(&state, "A"), Selection::Indeterminate);
    assert_eq!(selection(&state, "A-02"), Selection::Unchecked);
    assert_eq!(state.checked_leaves(), [path("A-01-X"), path("A-01-Y")]);
}

#[test]
fn max_depth_one_collapses_to_single_root() {
    let mut state = TreeState::default();
    let summary = state.ingest(["A-01", "A-01-X"], Some(1)).unwrap();

    assert_eq!(summary.codes, 2);
    assert_eq!(summary.nodes, 1);
    let root = state.tree().root("A").unwrap();
    assert_eq!(root.depth(), 1);
    assert!(root.is_leaf());
}

#[test]
fn codes_are_cut_at_the_bounds_without_max_depth() {
    let mut state = TreeState::default();
    let deep = vec!["x"; 5000].join("-");
    let summary = state.ingest([deep.as_str(), "A-01"], None).unwrap();

    assert_eq!(summary.truncated, 1);
    assert_eq!(state.tree().height(), 10);
    assert_eq!(summary.nodes, 12);

    let leaf = state.tree().iter().last().unwrap().path().clone();
    assert_eq!(leaf.depth(), 10);
    state.set_checked(&path("x"), true).unwrap();
    assert_eq!(selection(&state, &leaf.to_code()), Selection::Checked);
    state.expand_all();
    assert!(inconsistent_nodes(state.tree()).is_empty());
}

#[test]
fn empty_input_yields_empty_tree() {
    let mut state = TreeState::default();
    let summary = state.ingest(["", "  ", "---"], None).unwrap();
    assert!(state.tree().is_empty());
    assert_eq!(summary.discarded, 1);
    assert_eq!(summary.empty_input(), Some(TreeError::EmptyInput));
}

#[test]
fn max_depth_outside_bounds_is_rejected() {
    let mut state = state_with(&["A-1"]);
    let err = state.ingest(["B-1"], Some(11)).unwrap_err();
    assert!(matches!(err, TreeError::DepthOutOfRange { value: 11, .. }));
    // previous tree kept
    assert!(state.tree().root("A").is_some());
}

#[test]
fn rebuild_resets_selection_and_annotations() {
    let mut state = state_with(&["A-1", "B-1"]);
    state.toggle_all();
    state.toggle_annotations([path("A")]).unwrap();

    state.ingest(["A-1", "B-1"], None).unwrap();
    assert!(state.annotations().is_empty());
    assert!(
        state
            .nodes()
            .iter()
            .all(|n| n.selection == Selection::Unchecked)
    );
}

#[test]
fn annotations_are_independent_of_selection() {
    let mut state = state_with(&["A-1", "A-2"]);
    state
        .toggle_annotations([path("A-1"), path("A-2")])
        .unwrap();
    state.set_checked(&path("A"), true).unwrap();
    assert!(state.is_annotated(&path("A-1")));

    state.toggle_annotations([path("A-1")]).unwrap();
    assert!(!state.is_annotated(&path("A-1")));
    assert!(state.is_annotated(&path("A-2")));
    assert_eq!(selection(&state, "A-1"), Selection::Checked);
}

#[test]
fn unknown_annotation_path_changes_nothing() {
    let mut state = state_with(&["A-1"]);
    let err = state
        .toggle_annotations([path("A"), path("Q")])
        .unwrap_err();
    assert_eq!(err, TreeError::NodeNotFound { path: path("Q") });
    assert!(!state.is_annotated(&path("A")));
}

#[test]
fn display_depth_drives_visible_rows() {
    let mut state = state_with(&["A-1-x", "A-2", "B"]);
    state.set_display_depth(1).unwrap();
    let rows: Vec<String> = state
        .visible_nodes()
        .iter()
        .map(|n| n.path.to_code())
        .collect();
    assert_eq!(rows, ["A", "B"]);

    state.set_display_depth(2).unwrap();
    let rows: Vec<String> = state
        .visible_nodes()
        .iter()
        .map(|n| n.path.to_code())
        .collect();
    assert_eq!(rows, ["A", "A-1", "A-2", "B"]);

    assert!(state.set_display_depth(0).is_err());
    assert_eq!(state.display().depth, 2);
}

#[test]
fn expand_and_collapse_all_respect_threshold() {
    let mut state = state_with(&["A-1-x", "A-2"]);
    state.set_display_depth(1).unwrap();
    state.set_collapse_threshold(2).unwrap();

    state.expand_all();
    let expanded: Vec<String> = state
        .nodes()
        .iter()
        .filter(|n| n.expanded)
        .map(|n| n.path.to_code())
        .collect();
    assert_eq!(expanded, ["A-1", "A-1-x", "A-2"]);
    // root stays closed, so only it is visible
    assert_eq!(state.visible_nodes().len(), 1);

    state.set_expanded(&path("A"), true).unwrap();
    state.collapse_all();
    assert_eq!(state.visible_nodes().len(), 3);
}

#[test]
fn overlay_drops_unknown_paths_and_defaults_new_ones() {
    let mut state = state_with(&["A-1", "A-2", "C"]);
    let mut saved = SelectionMap::new();
    saved.insert(path("A-1"), Selection::Checked);
    saved.insert(path("A-2"), Selection::Checked);
    saved.insert(path("B"), Selection::Checked);
    let mut expanded = BTreeMap::new();
    expanded.insert(path("A"), false);

    let summary = state
        .overlay(
            &saved,
            &[path("C"), path("B-9")],
            &expanded,
            DisplaySettings {
                depth: 3,
                collapse_threshold: 1,
            },
        )
        .unwrap();

    assert_eq!(summary.matched, 3);
    assert_eq!(summary.dropped, 2);
    assert_eq!(selection(&state, "A"), Selection::Checked);
    assert_eq!(selection(&state, "C"), Selection::Unchecked);
    assert!(state.is_annotated(&path("C")));
    assert!(!state.tree().root("A").unwrap().is_expanded());
    assert!(inconsistent_nodes(state.tree()).is_empty());
}

#[test]
fn depth_summary_counts_levels() {
    let mut state = state_with(&["A-1", "A-2", "B"]);
    state.set_checked(&path("A-1"), true).unwrap();
    state.toggle_annotations([path("B")]).unwrap();

    let summary = state.depth_summary();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].nodes, 2);
    assert_eq!(summary[0].indeterminate, 1);
    assert_eq!(summary[0].annotated, 1);
    assert_eq!(summary[0].leaves, 1);
    assert_eq!(summary[1].nodes, 2);
    assert_eq!(summary[1].checked, 1);
}

#[test]
fn config_display_is_clamped_on_construction() {
    let mut config = EngineConfig::default();
    config.display.depth = 40;
    let state = TreeState::new(&config);
    assert_eq!(state.display().depth, 10);
}

#[test]
fn narrow_bounds_from_toml_clamp_display() {
    let config: EngineConfig =
        toml::from_str("[bounds]\nmin = 2\nmax = 4\n[display]\ndepth = 9\n").unwrap();
    let state = TreeState::new(&config);
    assert_eq!(state.bounds(), DepthBounds::new(2, 4).unwrap());
    assert_eq!(
        state.display(),
        DisplaySettings {
            depth: 4,
            collapse_threshold: 2
        }
    );
}

#[test]
fn inverted_bounds_never_reach_the_engine() {
    let parsed = toml::from_str::<EngineConfig>("[bounds]\nmin = 5\nmax = 2\n");
    assert!(parsed.is_err());
    assert!(matches!(
        DepthBounds::new(5, 2),
        Err(TreeError::InvalidBounds { min: 5, max: 2, .. })
    ));
}
