//! Save/restore behaviour of saved documents.

use codetree_core::{EngineConfig, TreeState, inconsistent_nodes};
use codetree_model::{DepthBounds, NodePath, Selection};
use codetree_persistence::{Document, PersistenceError, load_document, save_document};
use proptest::prelude::*;
use tempfile::tempdir;

fn path(code: &str) -> NodePath {
    code.parse().expect("valid path")
}

fn sample_state() -> TreeState {
    let mut state = TreeState::default();
    state.ingest(["A-01-X", "A-01-Y", "A-02-X"], None).unwrap();
    state.set_checked(&path("A-01-X"), true).unwrap();
    state.set_checked(&path("A-01-Y"), true).unwrap();
    state.toggle_annotations([path("A-02")]).unwrap();
    state.set_display_depth(3).unwrap();
    state.set_collapse_threshold(2).unwrap();
    state
}

#[test]
fn document_has_the_expected_shape() {
    let document = Document::capture(&sample_state());
    let value: serde_json::Value =
        serde_json::from_slice(&document.to_json().unwrap()).unwrap();

    assert_eq!(value["structure"][0]["key"], "A");
    assert_eq!(value["structure"][0]["expanded"], true);
    assert_eq!(value["structure"][0]["children"][0]["key"], "01");
    assert_eq!(value["structure"][0]["children"][1]["key"], "02");
    assert_eq!(value["selection"]["A"], "indeterminate");
    assert_eq!(value["selection"]["A-01"], "checked");
    assert_eq!(value["selection"]["A-02-X"], "unchecked");
    assert_eq!(value["annotated"], serde_json::json!(["A-02"]));
    assert_eq!(
        value["displaySettings"],
        serde_json::json!({"depth": 3, "collapseThreshold": 2})
    );
}

#[test]
fn save_and_load_reproduce_state() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tree.json");
    let state = sample_state();

    save_document(&Document::capture(&state), &file).unwrap();
    let restored = load_document(&file)
        .unwrap()
        .restore(DepthBounds::default())
        .unwrap();

    assert_eq!(restored, state);
    assert_eq!(restored.checked_leaves(), [path("A-01-X"), path("A-01-Y")]);
}

#[test]
fn empty_tree_round_trips() {
    let state = TreeState::default();
    let document = Document::capture(&state);
    assert!(document.structure.is_empty());

    let bytes = document.to_json().unwrap();
    let restored = Document::from_json(&bytes)
        .unwrap()
        .restore(DepthBounds::default())
        .unwrap();
    assert!(restored.tree().is_empty());
}

fn long_code(segments: usize) -> String {
    (0..segments)
        .map(|i| format!("S{i}"))
        .collect::<Vec<_>>()
        .join("-")
}

#[test]
fn deepest_allowed_tree_round_trips_through_json() {
    let bounds = DepthBounds::new(1, DepthBounds::CEILING).unwrap();
    let config = EngineConfig {
        bounds,
        ..EngineConfig::default()
    };
    let mut state = TreeState::new(&config);
    let summary = state.ingest([long_code(70)], None).unwrap();
    assert_eq!(summary.truncated, 1);
    assert_eq!(state.tree().height(), usize::from(DepthBounds::CEILING));

    let leaf = state.tree().iter().last().unwrap().path().clone();
    state.set_checked(&leaf, true).unwrap();
    state.expand_all();

    let bytes = Document::capture(&state).to_json().unwrap();
    let restored = Document::from_json(&bytes)
        .unwrap()
        .restore(bounds)
        .unwrap();
    assert_eq!(restored, state);
}

#[test]
fn very_long_code_is_cut_at_the_default_limit() {
    let mut state = TreeState::default();
    let summary = state.ingest([vec!["a"; 8000].join("-")], None).unwrap();
    assert_eq!(summary.nodes, 10);
    assert_eq!(state.tree().height(), 10);

    let bytes = Document::capture(&state).to_json().unwrap();
    let restored = Document::from_json(&bytes)
        .unwrap()
        .restore(DepthBounds::default())
        .unwrap();
    assert_eq!(restored, state);
}

#[test]
fn restore_rejects_structure_deeper_than_bounds() {
    let mut state = TreeState::default();
    state.ingest([long_code(8)], None).unwrap();
    let document = Document::capture(&state);

    let shallow = DepthBounds::new(1, 4).unwrap();
    let err = document.restore(shallow).unwrap_err();
    assert!(matches!(err, PersistenceError::MalformedDocument { .. }));
    assert!(err.to_string().contains("depth limit 4"), "{err}");
}

#[test]
fn apply_to_rebuilt_tree_keeps_matching_paths() {
    let document = Document::capture(&sample_state());

    let mut rebuilt = TreeState::default();
    rebuilt.ingest(["A-01-X", "A-01-Z", "B-1"], None).unwrap();
    let summary = document.apply_to(&mut rebuilt).unwrap();

    // A, A-01, A-01-X match; A-01-Y, A-02, A-02-X and the A-02 annotation do not
    assert_eq!(summary.matched, 3);
    assert_eq!(summary.dropped, 4);
    assert_eq!(
        rebuilt.tree().get(&path("A-01-X")).unwrap().selection(),
        Selection::Checked
    );
    assert_eq!(
        rebuilt.tree().get(&path("A-01-Z")).unwrap().selection(),
        Selection::Unchecked
    );
    assert_eq!(
        rebuilt.tree().get(&path("A-01")).unwrap().selection(),
        Selection::Indeterminate
    );
    assert!(rebuilt.annotations().is_empty());
    assert_eq!(rebuilt.display().depth, 3);
    assert!(inconsistent_nodes(rebuilt.tree()).is_empty());
}

#[test]
fn out_of_range_display_settings_change_nothing() {
    let mut document = Document::capture(&sample_state());
    document.display_settings.depth = 42;

    assert!(matches!(
        document.restore(DepthBounds::default()),
        Err(PersistenceError::MalformedDocument { .. })
    ));

    let mut target = TreeState::default();
    target.ingest(["A-01-X"], None).unwrap();
    let before = target.clone();
    assert!(document.apply_to(&mut target).is_err());
    assert_eq!(target, before);
}

#[test]
fn missing_top_level_field_is_malformed() {
    let json = br#"{"structure": [], "selection": {}, "annotated": []}"#;
    assert!(matches!(
        Document::from_json(json),
        Err(PersistenceError::MalformedDocument { .. })
    ));
}

#[test]
fn bad_selection_path_is_malformed() {
    let json = br#"{
        "structure": [],
        "selection": {"A--1": "checked"},
        "annotated": [],
        "displaySettings": {"depth": 1, "collapseThreshold": 1}
    }"#;
    assert!(matches!(
        Document::from_json(json),
        Err(PersistenceError::MalformedDocument { .. })
    ));
}

fn codes_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::collection::vec("[A-D]", 1..4), 0..12)
        .prop_map(|codes| codes.into_iter().map(|segments| segments.join("-")).collect())
}

proptest! {
    #[test]
    fn capture_then_restore_is_identity(
        codes in codes_strategy(),
        picks in prop::collection::vec(any::<usize>(), 0..6),
        depth in 1usize..=10,
    ) {
        let mut state = TreeState::default();
        state.ingest(&codes, None).unwrap();
        state.set_display_depth(depth).unwrap();
        let paths: Vec<NodePath> = state.nodes().iter().map(|n| n.path.clone()).collect();
        if !paths.is_empty() {
            for (n, pick) in picks.iter().enumerate() {
                let target = &paths[pick % paths.len()];
                if n % 2 == 0 {
                    state.toggle(target).unwrap();
                } else {
                    state.toggle_annotations([target.clone()]).unwrap();
                }
            }
        }

        let bytes = Document::capture(&state).to_json().unwrap();
        let restored = Document::from_json(&bytes)
            .unwrap()
            .restore(state.bounds())
            .unwrap();
        prop_assert_eq!(restored, state);
    }
}
