//! Visited-project tracking persisted in durable storage.
//!
//! Project pages carry a key (`<body data-project-key="…">`); the landing
//! page lists every project as `<li data-key="…">`. On each load the map is
//! read from localStorage, previously seen entries are styled as visited,
//! and the current page's key (if any) is written back. Keys are only ever
//! added, never removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, StoreError};

/// localStorage key holding the serialized map.
pub const VISITED_KEY: &str = "visitedProjects";

/// Map from project key to `true`, stored as a flat JSON object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitedProjects {
    entries: BTreeMap<String, bool>,
}

impl VisitedProjects {
    /// Read the map from `store`. An absent key yields an empty map; so does
    /// malformed JSON (with a console warning) rather than aborting the load.
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(VISITED_KEY) {
            None => Self::default(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn(&format!("discarding malformed '{VISITED_KEY}': {e}"));
                Self::default()
            }),
        }
    }

    pub fn is_visited(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mark `key` visited and persist the whole map. Always rewrites storage,
    /// even when the key was already present.
    pub fn record(&mut self, key: &str, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), true);
        let raw = serde_json::to_string(self)
            .map_err(|e| StoreError(format!("serializing '{VISITED_KEY}': {e}")))?;
        store.set(VISITED_KEY, &raw)
    }
}

fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}
