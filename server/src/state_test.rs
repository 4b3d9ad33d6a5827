use super::*;

#[test]
fn new_takes_outbound_capacity_from_config() {
    let config = ServerConfig { ws_outbound_capacity: 12, ..ServerConfig::default() };
    let state = AppState::new(test_helpers::test_app_state().store, &config);
    assert_eq!(state.ws_outbound_capacity, 12);
}

#[test]
fn new_never_allows_zero_capacity() {
    let config = ServerConfig { ws_outbound_capacity: 0, ..ServerConfig::default() };
    let state = AppState::new(test_helpers::test_app_state().store, &config);
    assert_eq!(state.ws_outbound_capacity, 1);
}

#[tokio::test]
async fn seeded_notes_are_visible_through_the_shared_store() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    let note = test_helpers::seed_note(&state, "shared", 5).await;

    let notes = clone.store.query_since(0).await.expect("query");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, note.id);
    assert_eq!(clone.store.backend(), "memory");
}
