use super::*;

#[test]
fn memory_store_round_trips_saved_states() {
    let mut store = MemoryProgressStore::new(ProgressSnapshot {
        node_states: BTreeMap::from([("w1".to_string(), NodeState::Completed)]),
        current_week: 2,
        current_day: 3,
    });

    store.save_node_state("w2", NodeState::InProgress).unwrap();

    let snapshot = store.load_progress("12-week").unwrap();
    assert_eq!(snapshot.current_week, 2);
    assert_eq!(snapshot.node_states["w1"], NodeState::Completed);
    assert_eq!(snapshot.node_states["w2"], NodeState::InProgress);
}

#[test]
fn snapshot_serializes_for_transport() {
    let snapshot = ProgressSnapshot {
        node_states: BTreeMap::from([("w1".to_string(), NodeState::Skipped)]),
        current_week: 1,
        current_day: 1,
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"skipped\""));
    let back: ProgressSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.node_states["w1"], NodeState::Skipped);
}
