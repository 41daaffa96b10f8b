//! Key/value persistence for small UI state (last filter selection).
//!
//! Pages talk to [`SelectionStore`]; the browser build uses [`LocalStorage`],
//! tests and storage-less browsers use [`MemoryStore`].

use std::collections::HashMap;
use std::sync::Mutex;

pub trait SelectionStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`; every call is a no-op when storage is unavailable
/// (private mode, disabled cookies).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    pub fn is_available() -> bool {
        Self::storage().is_some()
    }
}

impl SelectionStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            log::warn!("localStorage.setItem({}) failed: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store, lost on reload
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load("k"), None);
        store.save("k", "v1");
        store.save("k", "v2");
        assert_eq!(store.load("k").as_deref(), Some("v2"));
        store.remove("k");
        assert_eq!(store.load("k"), None);
    }
}
