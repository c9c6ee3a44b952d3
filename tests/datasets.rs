// Additional integration tests for the project-key dataset.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use konnerverse::store::MemoryStore;
use konnerverse::visited::VisitedProjects;

#[test]
fn project_keys_are_unique_and_well_formed() {
    let mut seen = HashSet::new();
    for key in konnerverse::PROJECT_KEYS {
        assert!(seen.insert(*key), "duplicate project key '{}'", key);
        assert!(!key.is_empty(), "empty project key");
        for c in key.chars() {
            assert!(
                c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-',
                "invalid char '{}' in project key '{}'",
                c,
                key
            );
        }
        assert!(
            !key.starts_with('-') && !key.ends_with('-'),
            "project key '{}' has a dangling hyphen",
            key
        );
    }
}

#[test]
fn every_project_key_can_be_recorded_and_reloaded() {
    let mut store = MemoryStore::new();
    let mut visited = VisitedProjects::load(&store);
    for key in konnerverse::PROJECT_KEYS {
        visited.record(key, &mut store).unwrap();
    }
    let reloaded = VisitedProjects::load(&store);
    assert_eq!(reloaded.len(), konnerverse::PROJECT_KEYS.len());
    for key in konnerverse::PROJECT_KEYS {
        assert!(reloaded.is_visited(key), "key '{}' lost on reload", key);
    }
}
