use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::local::LocalStore;

/// In-memory LocalStore for testing and non-browser builds.
///
/// Clones share the same map, so a clone handed to a component sees writes
/// made through the original.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a bearer credential.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set_token(token);
        store
    }

    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock only means a panicking writer; the map itself is intact.
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::{THEME_KEY, TOKEN_KEY};

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("missing").is_none());

        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.set("k", "w");
        assert_eq!(store.get("k").as_deref(), Some("w"));

        store.remove("k");
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_token_helpers() {
        let store = MemoryStore::new();
        assert!(store.token().is_none());

        store.set_token("abc123");
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc123"));

        store.clear_token();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_blank_token_is_absent() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "   ");
        assert!(store.token().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::with_token("t1");
        let other = store.clone();
        other.set_theme("dark");

        assert_eq!(store.theme().as_deref(), Some("dark"));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(other.token().as_deref(), Some("t1"));
    }
}
