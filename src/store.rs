//! Key-value storage seams over the browser's session and local storage.
//!
//! The page logic is written against [`KeyValueStore`] so it can run (and be
//! tested) without a browser; [`BrowserStore`] is the real backing used from
//! the wasm entry point.

use std::collections::HashMap;
use std::fmt;

use wasm_bindgen::JsValue;

/// Error raised when a storage write is rejected (e.g. quota exceeded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for JsValue {
    fn from(err: StoreError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Minimal get/set capability over a string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store used by native tests and headless callers.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a `web_sys::Storage` (sessionStorage or localStorage).
pub struct BrowserStore {
    inner: web_sys::Storage,
}

impl BrowserStore {
    /// Session-scoped storage; `None` when the browser denies access.
    pub fn session() -> Option<Self> {
        let inner = web_sys::window()?.session_storage().ok().flatten()?;
        Some(Self { inner })
    }

    /// Durable storage; `None` when the browser denies access.
    pub fn local() -> Option<Self> {
        let inner = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { inner })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StoreError(format!("write of '{key}' rejected: {e:?}")))
    }
}
