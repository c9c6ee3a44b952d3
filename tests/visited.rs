// Native tests for visited-project persistence against the in-memory store.

use konnerverse::store::{KeyValueStore, MemoryStore};
use konnerverse::visited::{VISITED_KEY, VisitedProjects};
use serde_json::json;

#[test]
fn absent_key_loads_empty_map() {
    let store = MemoryStore::new();
    let visited = VisitedProjects::load(&store);
    assert!(visited.is_empty());
    assert!(!visited.is_visited("chatbot"));
}

#[test]
fn malformed_json_loads_empty_map() {
    let mut store = MemoryStore::new();
    store.set(VISITED_KEY, "{not json").unwrap();
    let visited = VisitedProjects::load(&store);
    assert!(visited.is_empty());
}

#[test]
fn record_persists_key_as_true() {
    let mut store = MemoryStore::new();
    let mut visited = VisitedProjects::load(&store);
    visited.record("chatbot", &mut store).unwrap();

    assert!(visited.is_visited("chatbot"));
    let raw = store.get(VISITED_KEY).expect("map was persisted");
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
        json!({ "chatbot": true })
    );
}

#[test]
fn recording_twice_persists_identical_content() {
    let mut store = MemoryStore::new();

    let mut visited = VisitedProjects::load(&store);
    visited.record("simulation", &mut store).unwrap();
    let first = store.get(VISITED_KEY).unwrap();

    // Second page load of the same project: always rewrites, same content.
    let mut visited = VisitedProjects::load(&store);
    visited.record("simulation", &mut store).unwrap();
    let second = store.get(VISITED_KEY).unwrap();

    assert_eq!(first, second);
}

#[test]
fn prior_entries_survive_new_recordings() {
    let mut store = MemoryStore::new();
    store.set(VISITED_KEY, r#"{"alpha":true}"#).unwrap();

    // Render pass happens before the current page is added: alpha is marked,
    // beta is not yet.
    let mut visited = VisitedProjects::load(&store);
    assert!(visited.is_visited("alpha"));
    assert!(!visited.is_visited("beta"));

    visited.record("beta", &mut store).unwrap();
    let raw = store.get(VISITED_KEY).unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
        json!({ "alpha": true, "beta": true })
    );

    let reloaded = VisitedProjects::load(&store);
    assert!(reloaded.is_visited("alpha"));
    assert!(reloaded.is_visited("beta"));
}

#[test]
fn explicit_false_entry_is_not_visited() {
    let mut store = MemoryStore::new();
    store.set(VISITED_KEY, r#"{"gamma":false}"#).unwrap();
    let visited = VisitedProjects::load(&store);
    assert!(!visited.is_visited("gamma"));
    assert_eq!(visited.len(), 1);
}

#[test]
fn keys_are_only_ever_added() {
    let mut store = MemoryStore::new();
    let mut visited = VisitedProjects::load(&store);
    for (i, key) in ["a", "b", "c", "b"].iter().enumerate() {
        visited.record(key, &mut store).unwrap();
        assert_eq!(visited.len(), (i + 1).min(3));
    }
}
